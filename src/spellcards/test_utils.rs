use crate::model::Catalog;
use serde_json::{json, Value};

/// A minimal valid entry object; tests tweak individual fields from here.
pub fn entry_json(title: &str, kind: &str, level: i64, traditions: &[&str]) -> Value {
    json!({
        "title": title,
        "type": kind,
        "level": level,
        "rarity": "common",
        "source": "Player Core",
        "copyright": "2023 Paizo Inc.",
        "traditions": traditions,
        "traits": [],
        "actions": "[one-action]",
        "description": format!("<p>{}</p>", title),
    })
}

pub fn sample_payload() -> Value {
    let mut fireball = entry_json("Fireball", "spell", 3, &["arcane", "primal"]);
    fireball["traits"] = json!(["concentrate", "fire", "manipulate"]);
    fireball["actions"] = json!("[two-actions]");
    fireball["description"] = json!(
        "<p><strong>Range</strong> 500 feet</p>\n<p>A roaring blast of fire detonates.</p>\n<hr/>\n<p><strong>Heightened (+1)</strong> The damage increases by 2d6.</p>"
    );

    let mut heal = entry_json("Heal", "spell", 1, &["divine", "primal"]);
    heal["traits"] = json!(["healing", "manipulate", "vitality"]);
    heal["actions"] = json!("[one-action] to [three-actions]");

    let mut light = entry_json("Light", "cantrip", 1, &[]);
    light["traits"] = json!(["light", "manipulate"]);
    light["source"] = json!("Player Core 2");

    let mut shield = entry_json("Shield", "cantrip", 1, &["arcane", "divine", "occult"]);
    shield["traits"] = json!(["force"]);
    shield["rarity"] = json!("uncommon");
    shield["actions"] = json!("[reaction]");

    json!({
        "shield": shield,
        "fireball": fireball,
        "light": light,
        "heal": heal,
    })
}

pub fn sample_catalog() -> Catalog {
    Catalog::from_json(&sample_payload().to_string()).expect("sample payload is valid")
}
