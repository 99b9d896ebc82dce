// Shared test fixture for course locations.

use crate::modules::golf::core::model::CourseLocation;
use std::fs;

/// "Riverside" with two nine-hole courses: `course-front` then `course-back`.
pub fn riverside_location() -> CourseLocation {
    let json_str =
        fs::read_to_string("./src/tests/fixtures/json/riverside_location.json").unwrap();
    serde_json::from_str(&json_str).unwrap()
}
