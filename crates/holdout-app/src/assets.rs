//! Asset catalog: resolves sprite and sound keys against an asset directory.
//!
//! Missing files never stop the game. A missing sprite resolves to a flat
//! coloured placeholder of the same on-screen size, a missing sound resolves
//! to silence. The simulation never sees any of this.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use holdout_core::constants::*;
use holdout_core::enums::{EnemyVariant, SupplyKind};
use holdout_core::events::AudioEvent;

/// Placeholder tint used when a sprite file is missing.
const PLACEHOLDER_RED: [u8; 3] = [255, 0, 0];
const PLACEHOLDER_GREEN: [u8; 3] = [0, 255, 0];
const PLACEHOLDER_ORANGE: [u8; 3] = [255, 165, 0];
const PLACEHOLDER_YELLOW: [u8; 3] = [255, 255, 0];

/// Sprite keys, their file stems and drawn size in pixels.
const SPRITES: [(&str, &str, f64); 10] = [
    ("player", "player", PLAYER_SIZE),
    ("zombie_normal", "zombie1", NORMAL_ENEMY_SIZE),
    ("zombie_fast", "zombie2", FAST_ENEMY_SIZE),
    ("zombie_tank", "zombie3", TANK_ENEMY_SIZE),
    ("bullet", "bullet", BULLET_SIZE),
    ("health_pack", "health", SUPPLY_SIZE),
    ("ammo_pack", "ammo", SUPPLY_SIZE),
    ("speed_pack", "speed", SUPPLY_SIZE),
    ("score_pack", "score", SUPPLY_SIZE),
    ("background", "background", 0.0),
];

const SOUNDS: [&str; 12] = [
    "collect",
    "shoot",
    "hit",
    "zombie_death",
    "dash",
    "victory",
    "game_over",
    "weapon_switch",
    "reload",
    "typing",
    "access_granted",
    "menu_select",
];

/// Where a sprite's pixels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteSource {
    File(PathBuf),
    Placeholder { rgb: [u8; 3] },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub source: SpriteSource,
    /// Drawn side length in pixels; 0 means "fill the screen".
    pub size: f64,
}

/// Resolved sprites and sounds.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    sprites: BTreeMap<&'static str, Sprite>,
    sounds: BTreeMap<&'static str, PathBuf>,
}

impl AssetCatalog {
    /// Resolve every known key under `root` (`<root>/<stem>.png` and
    /// `<root>/sounds/<name>.wav`). With no root everything is a placeholder.
    pub fn load(root: Option<&Path>) -> Self {
        let mut catalog = Self::default();

        for (key, stem, size) in SPRITES {
            let file = root
                .map(|r| r.join(format!("{stem}.png")))
                .filter(|p| p.is_file());
            let source = match file {
                Some(path) => SpriteSource::File(path),
                None => {
                    if root.is_some() {
                        warn!(key, "sprite missing, using placeholder");
                    }
                    SpriteSource::Placeholder {
                        rgb: placeholder_tint(stem),
                    }
                }
            };
            catalog.sprites.insert(key, Sprite { source, size });
        }

        for name in SOUNDS {
            let file = root
                .map(|r| r.join("sounds").join(format!("{name}.wav")))
                .filter(|p| p.is_file());
            match file {
                Some(path) => {
                    catalog.sounds.insert(name, path);
                }
                None if root.is_some() => warn!(sound = name, "sound missing, will stay silent"),
                None => {}
            }
        }

        debug!(
            sprites = catalog.sprites.len(),
            sounds = catalog.sounds.len(),
            "asset catalog loaded"
        );
        catalog
    }

    pub fn sprite(&self, key: &str) -> Option<&Sprite> {
        self.sprites.get(key)
    }

    /// Sound file for an audio hint, if the hint has a sound and the file exists.
    pub fn sound_for(&self, event: &AudioEvent) -> Option<&Path> {
        sound_key(event).and_then(|key| self.sounds.get(key).map(PathBuf::as_path))
    }

    /// Hand a tick's audio hints to the mixer. There is no mixer in the
    /// headless driver, so this only traces what would play.
    pub fn play(&self, events: &[AudioEvent]) {
        for event in events {
            match self.sound_for(event) {
                Some(path) => trace!(?event, path = %path.display(), "play sound"),
                None => trace!(?event, "no sound"),
            }
        }
    }
}

/// Sound key for an audio hint. Reload completion has no sound.
pub fn sound_key(event: &AudioEvent) -> Option<&'static str> {
    match event {
        AudioEvent::ShotFired { .. } => Some("shoot"),
        AudioEvent::ReloadStarted { .. } => Some("reload"),
        AudioEvent::ReloadFinished { .. } => None,
        AudioEvent::HitTaken { .. } => Some("hit"),
        AudioEvent::EnemyKilled { .. } => Some("zombie_death"),
        AudioEvent::SupplyCollected { .. } => Some("collect"),
        AudioEvent::WeaponSwitched { .. } => Some("weapon_switch"),
        AudioEvent::DashPerformed => Some("dash"),
        AudioEvent::MatchWon => Some("victory"),
        AudioEvent::MatchLost => Some("game_over"),
        AudioEvent::MenuNavigated => Some("menu_select"),
        AudioEvent::Keystroke => Some("typing"),
        AudioEvent::AccessGranted => Some("access_granted"),
    }
}

pub fn enemy_sprite_key(variant: EnemyVariant) -> &'static str {
    match variant {
        EnemyVariant::Normal => "zombie_normal",
        EnemyVariant::Fast => "zombie_fast",
        EnemyVariant::Tank => "zombie_tank",
    }
}

/// Normal supplies have no art of their own and borrow the score pack.
pub fn supply_sprite_key(kind: SupplyKind) -> &'static str {
    match kind {
        SupplyKind::Health => "health_pack",
        SupplyKind::Ammo => "ammo_pack",
        SupplyKind::Speed => "speed_pack",
        SupplyKind::Normal | SupplyKind::Score => "score_pack",
    }
}

fn placeholder_tint(stem: &str) -> [u8; 3] {
    if stem.contains("player") {
        PLACEHOLDER_RED
    } else if stem.contains("zombie") {
        PLACEHOLDER_GREEN
    } else if stem.contains("bullet") {
        PLACEHOLDER_ORANGE
    } else {
        PLACEHOLDER_YELLOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use holdout_core::enums::WeaponKind;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("holdout-assets-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("sounds")).unwrap();
        dir
    }

    #[test]
    fn test_no_root_gives_placeholders() {
        let catalog = AssetCatalog::load(None);
        let player = catalog.sprite("player").unwrap();
        assert_eq!(player.source, SpriteSource::Placeholder { rgb: PLACEHOLDER_RED });
        assert_eq!(player.size, PLAYER_SIZE);
        assert_eq!(
            catalog.sprite(enemy_sprite_key(EnemyVariant::Tank)).unwrap().source,
            SpriteSource::Placeholder { rgb: PLACEHOLDER_GREEN }
        );
        assert!(catalog
            .sound_for(&AudioEvent::ShotFired { weapon: WeaponKind::Pistol })
            .is_none());
    }

    #[test]
    fn test_files_found_under_root() {
        let dir = scratch_dir("found");
        std::fs::write(dir.join("zombie2.png"), b"png").unwrap();
        std::fs::write(dir.join("sounds").join("dash.wav"), b"wav").unwrap();

        let catalog = AssetCatalog::load(Some(&dir));
        assert_eq!(
            catalog.sprite("zombie_fast").unwrap().source,
            SpriteSource::File(dir.join("zombie2.png"))
        );
        assert!(matches!(
            catalog.sprite("player").unwrap().source,
            SpriteSource::Placeholder { .. }
        ));
        assert_eq!(
            catalog.sound_for(&AudioEvent::DashPerformed),
            Some(dir.join("sounds").join("dash.wav").as_path())
        );
        assert!(catalog.sound_for(&AudioEvent::MatchWon).is_none());

        // Playing a mix of present and missing sounds never fails.
        catalog.play(&[AudioEvent::DashPerformed, AudioEvent::MatchLost]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_every_sound_key_is_known() {
        let events = [
            AudioEvent::ShotFired { weapon: WeaponKind::Rifle },
            AudioEvent::ReloadStarted { weapon: WeaponKind::Rifle },
            AudioEvent::HitTaken { damage: 10 },
            AudioEvent::EnemyKilled { variant: EnemyVariant::Fast },
            AudioEvent::SupplyCollected { kind: SupplyKind::Ammo },
            AudioEvent::WeaponSwitched { weapon: WeaponKind::Shotgun },
            AudioEvent::DashPerformed,
            AudioEvent::MatchWon,
            AudioEvent::MatchLost,
            AudioEvent::MenuNavigated,
            AudioEvent::Keystroke,
            AudioEvent::AccessGranted,
        ];
        for event in &events {
            let key = sound_key(event).unwrap();
            assert!(SOUNDS.contains(&key), "{key} not in the sound list");
        }
        assert!(sound_key(&AudioEvent::ReloadFinished { weapon: WeaponKind::Pistol }).is_none());
    }

    #[test]
    fn test_supply_sprites_exist() {
        let catalog = AssetCatalog::load(None);
        for kind in [
            SupplyKind::Normal,
            SupplyKind::Health,
            SupplyKind::Speed,
            SupplyKind::Ammo,
            SupplyKind::Score,
        ] {
            assert!(catalog.sprite(supply_sprite_key(kind)).is_some());
        }
    }
}
