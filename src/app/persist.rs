//! Door state and schedule persistence over [`StoragePort`].
//!
//! Both records are small `postcard` blobs in the `coopdoor` namespace.
//! Anything that does not decode (missing key, erased flash, an older
//! layout) reads back as absent, and the caller falls back to defaults.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::actuator::MotionState;
use crate::scheduler::DoorSchedule;

use super::ports::{StorageError, StoragePort};

pub const NAMESPACE: &str = "coopdoor";
pub const KEY_STATE: &str = "door_state";
pub const KEY_SCHEDULE: &str = "schedule";

const MAX_RECORD_SIZE: usize = 32;

/// On-flash form of [`MotionState`].
///
/// Kept separate from the domain enum so the stored discriminants stay
/// fixed even if the domain type is reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum StoredDoorState {
    Open,
    Closed,
    Opening,
    Closing,
    Unknown,
}

impl From<MotionState> for StoredDoorState {
    fn from(s: MotionState) -> Self {
        match s {
            MotionState::Open => Self::Open,
            MotionState::Closed => Self::Closed,
            MotionState::Opening => Self::Opening,
            MotionState::Closing => Self::Closing,
            MotionState::Unknown => Self::Unknown,
        }
    }
}

impl From<StoredDoorState> for MotionState {
    fn from(s: StoredDoorState) -> Self {
        match s {
            StoredDoorState::Open => Self::Open,
            StoredDoorState::Closed => Self::Closed,
            StoredDoorState::Opening => Self::Opening,
            StoredDoorState::Closing => Self::Closing,
            StoredDoorState::Unknown => Self::Unknown,
        }
    }
}

fn load_record<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
    S: StoragePort + ?Sized,
{
    let mut buf = [0u8; MAX_RECORD_SIZE];
    let len = match storage.read(NAMESPACE, key, &mut buf) {
        Ok(len) => len,
        Err(StorageError::NotFound) => {
            debug!("persist: no '{}' record", key);
            return None;
        }
        Err(e) => {
            warn!("persist: reading '{}' failed: {}", key, e);
            return None;
        }
    };
    match postcard::from_bytes(&buf[..len]) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("persist: '{}' record unreadable ({} bytes), ignoring", key, len);
            None
        }
    }
}

fn save_record<T, S>(storage: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: StoragePort + ?Sized,
{
    let mut buf = [0u8; MAX_RECORD_SIZE];
    let bytes = postcard::to_slice(value, &mut buf).map_err(|_| StorageError::IoError)?;
    storage.write(NAMESPACE, key, bytes)
}

/// Last persisted door state, or `None` if nothing usable is stored.
pub fn load_state<S: StoragePort + ?Sized>(storage: &S) -> Option<MotionState> {
    load_record::<StoredDoorState, _>(storage, KEY_STATE).map(MotionState::from)
}

pub fn save_state<S: StoragePort + ?Sized>(
    storage: &mut S,
    state: MotionState,
) -> Result<(), StorageError> {
    save_record(storage, KEY_STATE, &StoredDoorState::from(state))
}

/// Persisted schedule, or `None` if nothing usable is stored.
pub fn load_schedule<S: StoragePort + ?Sized>(storage: &S) -> Option<DoorSchedule> {
    let schedule: DoorSchedule = load_record(storage, KEY_SCHEDULE)?;
    // Re-validate: a blob written by other firmware may hold any bytes.
    if schedule.open_at.hour > crate::scheduler::MAX_HOUR
        || schedule.close_at.hour > crate::scheduler::MAX_HOUR
        || schedule.open_at.minute > crate::scheduler::MAX_MINUTE
        || schedule.close_at.minute > crate::scheduler::MAX_MINUTE
    {
        warn!("persist: stored schedule out of range, ignoring");
        return None;
    }
    Some(schedule)
}

pub fn save_schedule<S: StoragePort + ?Sized>(
    storage: &mut S,
    schedule: &DoorSchedule,
) -> Result<(), StorageError> {
    save_record(storage, KEY_SCHEDULE, schedule)
}
