use chrono::{DateTime, Days, Duration, Local, NaiveDate, TimeZone, Utc};

use crate::error::{CoreError, CoreResult};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Prefix of every registry sequence token.
pub const REGISTRY_ID_PREFIX: &str = "REG";

/// Minimum width of the zero-padded numeric suffix.
pub const REGISTRY_ID_WIDTH: usize = 5;

/// Human-readable registry sequence token, e.g. `REG00042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryId {
    sequence: u64,
}

impl RegistryId {
    /// ## Summary
    /// Builds the token for a sequence number. Sequence numbers start at 1.
    ///
    /// ## Errors
    /// Returns `InvalidInput` for a sequence number of zero.
    pub fn from_sequence(sequence: u64) -> CoreResult<Self> {
        if sequence == 0 {
            return Err(CoreError::InvalidInput(
                "registry sequence numbers start at 1".to_string(),
            ));
        }
        Ok(Self { sequence })
    }

    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl std::fmt::Display for RegistryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{REGISTRY_ID_PREFIX}{:0width$}",
            self.sequence,
            width = REGISTRY_ID_WIDTH
        )
    }
}

/// Whether the visitor already had a public account when the entry was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitorType {
    #[default]
    New,
    Existing,
}

impl VisitorType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Existing => "existing",
        }
    }
}

impl std::str::FromStr for VisitorType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "existing" => Ok(Self::Existing),
            other => Err(CoreError::ValidationError(format!(
                "visitor_type must be 'new' or 'existing', got '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for VisitorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryStatus {
    #[default]
    Active,
    CheckedOut,
    Deleted,
}

impl EntryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::CheckedOut => "checked_out",
            Self::Deleted => "deleted",
        }
    }

    /// ## Summary
    /// Returns whether an entry in this state may move to `target`.
    ///
    /// Transitions only go forward: `active -> checked_out`,
    /// `active -> deleted` and `checked_out -> deleted`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Active, Self::CheckedOut | Self::Deleted) | (Self::CheckedOut, Self::Deleted)
        )
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "checked_out" => Ok(Self::CheckedOut),
            "deleted" => Ok(Self::Deleted),
            other => Err(CoreError::ValidationError(format!(
                "status must be one of 'active', 'checked_out', 'deleted', got '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timezone used to turn calendar dates into timestamp windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficeTimezone {
    Local,
    Named(chrono_tz::Tz),
}

impl OfficeTimezone {
    /// Current calendar date in this timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Named(tz) => Utc::now().with_timezone(tz).date_naive(),
        }
    }

    /// ## Summary
    /// Returns the half-open UTC window `[start, end)` covering `date`.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if local midnight cannot be represented.
    pub fn day_bounds(&self, date: NaiveDate) -> CoreResult<(DateTime<Utc>, DateTime<Utc>)> {
        match self {
            Self::Local => day_bounds_in(&Local, date),
            Self::Named(tz) => day_bounds_in(tz, date),
        }
    }
}

fn day_bounds_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> CoreResult<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CoreError::InvalidInput(format!("date out of range: {date}")))?;
    Ok((start_of_day(tz, date)?, start_of_day(tz, next)?))
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> CoreResult<DateTime<Utc>> {
    // A DST jump can skip midnight; the day then starts at its first local minute.
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CoreError::InvalidInput(format!("no local midnight for {date}")))?;
    (0..MINUTES_PER_DAY)
        .filter_map(|minute| midnight.checked_add_signed(Duration::minutes(minute)))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
        .ok_or_else(|| CoreError::InvalidInput(format!("no local start of day for {date}")))
}
