//! Durable user profile store with file locking.
//!
//! Profiles are kept in a single JSON file keyed by user id. A sidecar
//! lock file is held exclusively across every read-modify-write, so
//! concurrent counter increments for the same user serialize instead of
//! losing updates, and a profile upsert acts as a barrier with respect
//! to in-flight increments.

use crate::{Error, Result, UserProfile};
use chrono::Utc;
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DATA_FILE: &str = "profiles.json";
const LOCK_FILE: &str = "profiles.lock";

/// File-backed store of user profiles and their same-day counters.
#[derive(Clone, Debug)]
pub struct ProfileStore {
    data_path: PathBuf,
    lock_path: PathBuf,
}

impl ProfileStore {
    /// Open (and initialize) a store under the given data directory.
    ///
    /// The directory is created if missing; the data file itself is
    /// created lazily on first write.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_path: data_dir.join(DATA_FILE),
            lock_path: data_dir.join(LOCK_FILE),
        })
    }

    /// Create or fully replace the profile for `user_id`.
    ///
    /// Unconditionally zeroes the three daily counters: resubmitting a
    /// profile starts a fresh tracking day. Idempotent for identical
    /// inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn upsert_profile(
        &self,
        user_id: i64,
        city: &str,
        weight: f64,
        height: f64,
        age: u32,
        activity_minutes: f64,
        water_goal: f64,
        calories_goal: f64,
    ) -> Result<UserProfile> {
        let profile = UserProfile {
            user_id,
            city: city.to_string(),
            weight,
            height,
            age,
            activity_minutes,
            water_goal,
            calories_goal,
            logged_water: 0.0,
            logged_calories: 0.0,
            burned_calories: 0.0,
            goals_set_at: Utc::now(),
        };

        let lock = self.acquire_exclusive()?;
        let mut profiles = read_profiles(&self.data_path);
        profiles.insert(user_id, profile.clone());
        let result = self.write_profiles(&profiles);
        lock.unlock()?;
        result?;

        tracing::info!(
            "Stored profile for user {} (water goal {} mL, calorie goal {} kcal)",
            user_id,
            water_goal,
            calories_goal
        );
        Ok(profile)
    }

    /// Read-only point lookup. Returns `None` when no record exists.
    pub fn get(&self, user_id: i64) -> Result<Option<UserProfile>> {
        let lock = self.acquire_shared()?;
        let profiles = read_profiles(&self.data_path);
        lock.unlock()?;
        Ok(profiles.get(&user_id).cloned())
    }

    /// Add to the logged-water counter, returning the updated record.
    pub fn add_water(&self, user_id: i64, amount: f64) -> Result<UserProfile> {
        self.update(user_id, |p| p.logged_water += amount)
    }

    /// Add to the logged-calories counter, returning the updated record.
    pub fn add_calories(&self, user_id: i64, amount: f64) -> Result<UserProfile> {
        self.update(user_id, |p| p.logged_calories += amount)
    }

    /// Add to the burned-calories counter, returning the updated record.
    pub fn add_burned_calories(&self, user_id: i64, amount: f64) -> Result<UserProfile> {
        self.update(user_id, |p| p.burned_calories += amount)
    }

    /// Load, modify and save a single profile under the exclusive lock.
    ///
    /// Fails with `ProfileNotFound` when no record exists; the update
    /// never creates one as a side effect.
    fn update<F>(&self, user_id: i64, f: F) -> Result<UserProfile>
    where
        F: FnOnce(&mut UserProfile),
    {
        let lock = self.acquire_exclusive()?;
        let mut profiles = read_profiles(&self.data_path);

        let result = match profiles.get_mut(&user_id) {
            Some(profile) => {
                f(profile);
                let updated = profile.clone();
                self.write_profiles(&profiles).map(|()| updated)
            }
            None => Err(Error::ProfileNotFound { user_id }),
        };

        lock.unlock()?;
        result
    }

    /// Acquire the exclusive sidecar lock, serializing all writers.
    fn acquire_exclusive(&self) -> Result<File> {
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.lock_path)?;
        lock.lock_exclusive()?;
        Ok(lock)
    }

    /// Acquire the shared sidecar lock for reading.
    fn acquire_shared(&self) -> Result<File> {
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.lock_path)?;
        lock.lock_shared()?;
        Ok(lock)
    }

    /// Atomically replace the data file via temp-file-then-rename.
    ///
    /// Must only be called while the exclusive lock is held.
    fn write_profiles(&self, profiles: &HashMap<i64, UserProfile>) -> Result<()> {
        let parent = self.data_path.parent().ok_or_else(|| {
            Error::Store(format!("data path {:?} has no parent", self.data_path))
        })?;
        let temp = NamedTempFile::new_in(parent)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(profiles)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(&self.data_path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} profiles to {:?}", profiles.len(), self.data_path);
        Ok(())
    }
}

/// Read the full profile map from disk.
///
/// A missing, unreadable or corrupted data file reads as an empty map
/// with a warning: a damaged store degrades to "no profiles" rather
/// than failing every operation outright.
fn read_profiles(path: &Path) -> HashMap<i64, UserProfile> {
    if !path.exists() {
        return HashMap::new();
    }

    let mut contents = String::new();
    match File::open(path) {
        Ok(mut file) => {
            if let Err(e) = file.read_to_string(&mut contents) {
                tracing::warn!("Failed to read profiles at {:?}: {}. Treating as empty.", path, e);
                return HashMap::new();
            }
        }
        Err(e) => {
            tracing::warn!("Unable to open profiles at {:?}: {}. Treating as empty.", path, e);
            return HashMap::new();
        }
    }

    match serde_json::from_str::<HashMap<i64, UserProfile>>(&contents) {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::warn!("Failed to parse profiles at {:?}: {}. Treating as empty.", path, e);
            HashMap::new()
        }
    }
}
