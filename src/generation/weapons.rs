//! # Weapon Creation
//!
//! Turns the weapon catalog into weapon instances with unique ids.

use crate::{DuelError, DuelResult, GameConfig, Weapon, WeaponId};

/// Creates every weapon for a new game.
///
/// Board weapons come first, one per non-default catalog entry and in catalog
/// order, so their ids line up with placement order. Two copies of the default
/// weapon follow; their ids are returned for the first and second player.
///
/// # Examples
///
/// ```
/// use gridduel::{instantiate_weapons, GameConfig, WeaponId};
///
/// let config = GameConfig::new();
/// let (weapons, defaults) = instantiate_weapons(&config).unwrap();
/// assert_eq!(weapons.len(), config.weapon_catalog.len() + 1);
/// assert_eq!(defaults, [WeaponId(4), WeaponId(5)]);
/// ```
pub fn instantiate_weapons(config: &GameConfig) -> DuelResult<(Vec<Weapon>, [WeaponId; 2])> {
    let mut weapons: Vec<Weapon> = Vec::with_capacity(config.weapon_catalog.len() + 1);

    for spec in config.board_weapons() {
        let id = next_id(&weapons)?;
        weapons.push(Weapon::new(id, spec.name.clone(), spec.damage, spec.icon.clone()));
    }

    let default = config.default_weapon_spec().ok_or_else(|| {
        DuelError::Config(format!(
            "default weapon '{}' is not in the catalog",
            config.default_weapon
        ))
    })?;

    let mut defaults = [WeaponId(0); 2];
    for slot in defaults.iter_mut() {
        let id = next_id(&weapons)?;
        weapons.push(Weapon::new(
            id,
            default.name.clone(),
            default.damage,
            default.icon.clone(),
        ));
        *slot = id;
    }

    Ok((weapons, defaults))
}

fn next_id(weapons: &[Weapon]) -> DuelResult<WeaponId> {
    u32::try_from(weapons.len())
        .map(WeaponId)
        .map_err(|_| DuelError::Config("too many weapons in the catalog".to_string()))
}
