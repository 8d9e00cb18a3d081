//! Allocation domain models.
//!
//! Provides the data types for describing an allocation problem and its
//! solution.
//!
//! | Type | Role |
//! |------|------|
//! | `StudentRecord` | Candidate with CGPA and ranked faculties |
//! | `OverrideEntry` | Locked student-to-faculty assignment |
//! | `CapacityTable` | Seat limits and loads per faculty |
//! | `Placement` | Where a student ended up, and why |
//! | `AllocationWarning` | Non-fatal conflict raised during a run |

mod capacity;
mod override_entry;
mod placement;
mod student;

pub use capacity::{CapacityTable, FacultyCapacity};
pub use override_entry::OverrideEntry;
pub use placement::{AllocationWarning, Placement, PlacementSource, WarningKind};
pub use student::{Preference, StudentRecord};
