//! Overwrite policy for existing outputs.

/// Whether a job runs, given the overwrite flag and whether its output
/// already exists.
///
/// | overwrite | exists | result  |
/// |-----------|--------|---------|
/// | false     | false  | convert |
/// | false     | true   | skip    |
/// | true      | false  | skip    |
/// | true      | true   | convert |
///
/// With overwrite on, outputs that do not exist yet are skipped.
pub fn should_convert(overwrite: bool, output_exists: bool) -> bool {
    overwrite == output_exists
}
