//! Student-to-supervisor allocation for the U-Engine ecosystem.
//!
//! Assigns students to faculty supervisors using CGPA ranking, ranked
//! preference lists, and locked overrides, while keeping faculty loads
//! balanced.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `StudentRecord`, `OverrideEntry`,
//!   `CapacityTable`, `Placement`, `AllocationWarning`
//! - **`schema`**: Faculty discovery from table headers
//! - **`planner`**: Even seat distribution with remainder seats
//! - **`allocator`**: Three-phase allocation engine and preference reports
//! - **`validation`**: Input integrity checks (duplicate rolls, bad CGPA, unknown faculties)
//! - **`table`**: Parsed student tables and CSV adapters
//! - **`config`**: Run configuration (fallback policy, greedy order, faculty limit)
//!
//! # Pipeline
//!
//! Schema → capacity plan → overrides → preference pass → fallback →
//! report. Each stage only reads what the previous one produced, and every
//! run owns its mutable state.
//!
//! # Example
//!
//! ```
//! use u_assign::table::io::read_students;
//!
//! let csv = "Roll,Name,Email,CGPA,Rao,Iyer\n\
//!            R1,Asha,asha@x.edu,9.1,1,2\n\
//!            R2,Bilal,bilal@x.edu,8.7,1,2\n";
//! let table = read_students(csv.as_bytes()).unwrap();
//! let outcome = u_assign::allocate(&table, &[]).unwrap();
//!
//! assert_eq!(outcome.faculty_of("R1"), Some("Rao"));
//! assert_eq!(outcome.faculty_of("R2"), Some("Iyer"));
//! ```

pub mod allocator;
pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod schema;
pub mod table;
pub mod validation;

pub use allocator::{allocate, AllocationOutcome, AllocationRow, Allocator, PreferenceStats};
pub use config::AllocationConfig;
pub use error::{AllocationError, Result};
