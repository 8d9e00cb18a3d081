//! Capacity planning.
//!
//! Seats are spread as evenly as possible: with `N` students and `F`
//! faculties every faculty gets `N / F` seats, and the first `N % F`
//! faculties in canonical order get one more. Total seats always equal `N`.

use tracing::info;

use crate::error::{AllocationError, Result};
use crate::models::{CapacityTable, FacultyCapacity};
use crate::schema::Schema;

/// Computes per-faculty seat limits.
///
/// # Errors
/// `Schema` if the schema has no faculties.
///
/// # Example
/// ```
/// use u_assign::planner::plan_capacities;
/// use u_assign::schema::Schema;
///
/// let schema = Schema::new(["Rao", "Iyer"]).unwrap();
/// let table = plan_capacities(5, &schema).unwrap();
/// assert_eq!(table.get("Rao").unwrap().limit, 3);
/// assert_eq!(table.get("Iyer").unwrap().limit, 2);
/// ```
pub fn plan_capacities(total_students: usize, schema: &Schema) -> Result<CapacityTable> {
    let faculty_count = schema.len();
    if faculty_count == 0 {
        return Err(AllocationError::schema(
            "cannot plan capacities for zero faculties",
        ));
    }

    let base = total_students / faculty_count;
    let remainder = total_students % faculty_count;
    info!(
        faculties = faculty_count,
        students = total_students,
        base,
        remainder,
        "planned faculty capacities"
    );

    let entries = schema
        .faculties()
        .iter()
        .enumerate()
        .map(|(i, name)| FacultyCapacity::new(name.clone(), base + usize::from(i < remainder)))
        .collect();

    Ok(CapacityTable::new(entries))
}
