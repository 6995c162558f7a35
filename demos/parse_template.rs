/// Example: Parse a map template file
///
/// Usage: cargo run --example parse_template [template_file]

use std::{env, fs};

use tplcfg::config::DwellingGeneration;

fn main() {
    let template_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/duel.json".to_string());

    let text = fs::read_to_string(&template_path).unwrap_or_else(|e| {
        eprintln!("Failed to read template file '{}': {}", template_path, e);
        std::process::exit(1);
    });

    match tplcfg::decode(&text) {
        Ok(template) => {
            println!("✓ Parsed template '{}'", template.template_name);
            println!("\nZones defined: {}", template.zones.len());

            for zone in &template.zones {
                println!("\nZone {}:", zone.zone_id);
                println!("  Terrain: {}", zone.terrain_type);
                if let Some(faction) = zone.town_faction {
                    println!("  Town: {}", faction);
                }
                let dwellings = zone
                    .dwelling_generation_config
                    .as_ref()
                    .and_then(|config| config.active_generation());
                match dwellings {
                    Some(DwellingGeneration::Dependant(config)) => {
                        println!("  Dwellings: copied from zone {}", config.zone_id)
                    }
                    Some(generation) => println!("  Dwellings: {}", generation.kind().wire_name()),
                    None => {}
                }
                println!("  Connections: {}", template.connections_of(zone.zone_id).count());
            }

            for warning in tplcfg::validate(&template) {
                println!("\nwarning: {}", warning);
            }
        }
        Err(e) => {
            eprintln!("✗ Failed to parse template:");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
