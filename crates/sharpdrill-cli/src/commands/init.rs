//! The `sharpdrill init` command.

use std::path::Path;

use anyhow::Result;

use sharpdrill_core::catalog::Catalog;
use sharpdrill_core::records::{reconcile, RecordStore, Records};

pub fn execute() -> Result<()> {
    if Path::new("sharpdrill.toml").exists() {
        println!("sharpdrill.toml already exists, skipping.");
    } else {
        std::fs::write("sharpdrill.toml", SAMPLE_CONFIG)?;
        println!("Created sharpdrill.toml");
    }

    let material_path = Path::new("material.json");
    if material_path.exists() {
        println!("material.json already exists, skipping.");
    } else {
        std::fs::write(material_path, SAMPLE_MATERIAL)?;
        println!("Created material.json");
    }

    let store = RecordStore::new("records.json");
    if store.path().exists() {
        println!("records.json already exists, skipping.");
    } else {
        let catalog = Catalog::load(material_path)?;
        let (records, _) = reconcile(Records::new(), &catalog);
        store.save(&records)?;
        println!("Created records.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own words to material.json");
    println!("  2. Run: sharpdrill validate");
    println!("  3. Run: sharpdrill drill");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# sharpdrill configuration

material_path = "material.json"
records_path = "records.json"

# Questions per drill (1 to 99)
questions = 15
review = true

# original, programmer, marine or clear
theme = "marine"

enabled_types = ["Noun", "Adjective+preposition"]
"#;

const SAMPLE_MATERIAL: &str = r#"{
    "Noun": {
        "1001": ["m", "Hund", "Hunde", ["dog"]],
        "1002": ["f", "Katze", "Katzen", ["cat"]],
        "1003": ["n", "Haus", "Häuser", ["house", "home"]],
        "1004": ["m", "Apfel", "Äpfel", ["apple"]],
        "1005": ["f", "Zeitung", "Zeitungen", ["newspaper"]],
        "1006": ["p", "Eltern", "Eltern", ["parents"]]
    },
    "Verb": {
        "2001": ["gehen", "gehe", "gehst", "geht", "gegangen", "geh!", ["to go", "to walk"]],
        "2002": ["sprechen", "spreche", "sprichst", "spricht", "gesprochen", "sprich!", ["to speak"]]
    },
    "Adjective+preposition": {
        "3001": ["stolz", "auf", "Akkusativ"],
        "3002": ["interessiert", "an", "Dativ"],
        "3003": ["abhängig", "von", "Dativ"],
        "3004": ["verantwortlich", "für", "Akkusativ"]
    }
}
"#;
