//! Exit codes, one per pipeline stage
//!
//! CI logs only show the exit status at a glance, so each stage that can
//! fail gets its own code.

/// Success - chart packaged and output written
pub const SUCCESS: u8 = 0;

/// General error - unspecified failure
pub const ERROR: u8 = 1;

/// Input error - missing or invalid inputs, chart not found
pub const INPUT_ERROR: u8 = 2;

/// Install error - Helm download, verification or extraction failed
pub const INSTALL_ERROR: u8 = 3;

/// Values error - a values overlay is missing or malformed
pub const VALUES_ERROR: u8 = 4;

/// Dependency error - `helm dependency update` failed
pub const DEPENDENCY_ERROR: u8 = 5;

/// Package error - `helm package` failed or produced nothing
pub const PACKAGE_ERROR: u8 = 6;

/// Output error - the step output could not be written
pub const OUTPUT_ERROR: u8 = 7;
