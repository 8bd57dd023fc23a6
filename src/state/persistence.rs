use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::state::manager::KitchenState;

/// Load kitchen state from a JSON file.
///
/// Repairs the id counter if it lags behind the ids already in use.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<KitchenState> {
    let content = fs::read_to_string(path)?;
    let mut state: KitchenState = serde_json::from_str(&content)?;

    let max_used = state.max_used_id();
    if state.next_id < max_used {
        warn!(
            next_id = state.next_id,
            max_used, "id counter behind stored records, advancing it"
        );
        state.next_id = max_used;
    }

    Ok(state)
}

/// Load kitchen state, starting empty when the file does not exist yet.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<KitchenState> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "no state file yet, starting empty");
        return Ok(KitchenState::default());
    }
    load_state(path)
}

/// Save kitchen state to a JSON file.
///
/// Writes a sibling temporary file and renames it over the target so a
/// crash never leaves a half-written state file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &KitchenState) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(state)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, IngredientCategory, IngredientId};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_load_and_save_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kitchen.json");

        let mut state = KitchenState {
            next_id: 1,
            ..Default::default()
        };
        state.ingredients.push(Ingredient {
            id: IngredientId(1),
            name: "Onion".to_string(),
            category: IngredientCategory::Produce,
        });

        save_state(&path, &state).unwrap();
        let reloaded = load_state(&path).unwrap();
        assert_eq!(reloaded, state);
        assert!(!dir.path().join("kitchen.json.tmp").exists());
    }

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempdir().unwrap();
        let state = load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(state, KitchenState::default());
    }

    #[test]
    fn test_counter_repaired() {
        let json = r#"{
            "next_id": 0,
            "ingredients": [{"id": 12, "name": "Salt", "category": "spices"}]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let state = load_state(file.path()).unwrap();
        assert_eq!(state.next_id, 12);
        assert_eq!(state.ingredients[0].category, IngredientCategory::Spices);
    }
}
