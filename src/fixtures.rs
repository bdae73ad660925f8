//! Shared DrugBank documents for unit tests.

/// Two records: Lepirudin with one target, SmallMolecule with none
pub(crate) const TWO_DRUGS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<drugbank xmlns="http://www.drugbank.ca">
    <drug type="biotech">
        <drugbank-id primary="true">DB00001</drugbank-id>
        <drugbank-id>BTD00024</drugbank-id>
        <name>Lepirudin</name>
        <targets>
            <target>
                <id>T001</id>
                <name>Thrombin</name>
                <polypeptide id="P00734" source="Swiss-Prot">
                    <name>Hirudin</name>
                    <gene-name>F2</gene-name>
                    <locus>11p15.5</locus>
                    <cellular-location>extracellular</cellular-location>
                    <external-identifiers>
                        <external-identifier>
                            <resource>GenAtlas</resource>
                            <identifier>F2-Gene</identifier>
                        </external-identifier>
                    </external-identifiers>
                </polypeptide>
            </target>
        </targets>
    </drug>
    <drug type="small molecule">
        <drugbank-id primary="true">DB00002</drugbank-id>
        <name>SmallMolecule</name>
    </drug>
</drugbank>
"#;

/// Records exercising pathways, wrappers, missing ids/names and root attributes
pub(crate) const PATHWAYS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<drugbank xmlns="http://www.drugbank.ca" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.drugbank.ca http://www.drugbank.ca/docs/drugbank.xsd" version="5.1" exported-on="2024-03-14">
  <drug type="small molecule" created="2005-06-13" updated="2024-03-01">
    <drugbank-id primary="true">DB00010</drugbank-id>
    <drugbank-id>APRD00001</drugbank-id>
    <name>Alphadrug</name>
    <description>First test drug</description>
    <synonyms>
      <synonym language="english">Alpha</synonym>
      <synonym language="latin">Alphum</synonym>
    </synonyms>
    <pathways>
      <pathway>
        <smpdb-id>SMP0001</smpdb-id>
        <name>Glycolysis</name>
        <drugs>
          <drug>
            <drugbank-id>DB00010</drugbank-id>
            <name>Alphadrug</name>
          </drug>
          <drug>
            <drugbank-id>DB00011</drugbank-id>
            <name>Betadrug</name>
          </drug>
        </drugs>
      </pathway>
    </pathways>
  </drug>
  <drug type="biotech" created="2005-06-13" updated="2024-03-01">
    <drugbank-id primary="true">DB00011</drugbank-id>
    <name>Betadrug</name>
    <description>Second test drug</description>
    <synonyms>
      <synonym language="english">Beta</synonym>
    </synonyms>
    <pathways>
      <pathway>
        <smpdb-id>SMP0002</smpdb-id>
        <name>Citric acid cycle</name>
        <drugs>
          <drug>
            <drugbank-id>DB00011</drugbank-id>
            <name>Betadrug</name>
          </drug>
        </drugs>
      </pathway>
    </pathways>
  </drug>
  <drug type="small molecule">
    <drugbank-id>DB00012</drugbank-id>
    <name>Gammadrug</name>
    <description>No primary id</description>
  </drug>
  <drug type="small molecule">
    <drugbank-id primary="true">DB00013</drugbank-id>
    <description>No name</description>
  </drug>
</drugbank>
"#;
