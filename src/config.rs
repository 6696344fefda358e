pub const NATURAL_GE_DENSITY: f64 = 5.323; // g/cm3 at room temperature
/// mm, segments shorter than this are ignored when validating
pub const PROFILE_TOLERANCE: f64 = 1e-9;
pub const CRACK_INTEGRATION_STEPS: usize = 2000; // must be even for Simpson's rule
pub const MASS_DEVIATION_WARNING: f64 = 0.05; // relative deviation from the production mass
pub const MM3_PER_CM3: f64 = 1000.0;
