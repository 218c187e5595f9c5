//! Playground settings and build-time constants.
//!
//! Settings are typed structs with sensible defaults. The version string and the
//! dev-build flag are injected by `build.rs` at compile time.

use crate::data_structures::material::Color3;

/// Package version followed by the number of revisions in the source history.
pub const VERSION: &str = env!("PLAYGROUND_VERSION");

/// `true` for debug-profile builds, `false` for release (production) builds.
pub const DEV_BUILD: bool = cfg!(dev_build);

/// Compile-time information handed to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub dev_build: bool,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            dev_build: DEV_BUILD,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TankConfig {
    pub body_diameter: f32,
    pub body_segments: u32,
    pub body_color: Color3,
    pub barrel_diameter: f32,
    pub barrel_length: f32,
    pub barrel_tessellation: u32,
    pub barrel_color: Color3,
    /// Height the merged tank is lifted by so it rests above the ground.
    pub lift: f32,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            body_diameter: 1.0,
            body_segments: 32,
            body_color: Color3::new(0.3, 0.7, 1.0),
            barrel_diameter: 0.45,
            barrel_length: 0.75,
            barrel_tessellation: 24,
            barrel_color: Color3::new(0.5, 0.5, 0.5),
            lift: 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroundConfig {
    pub width: f32,
    pub height: f32,
    pub subdivisions: u32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            subdivisions: 1,
        }
    }
}

/// Everything the scene builder and the app loop can be tuned with.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaygroundConfig {
    pub tank: TankConfig,
    pub ground: GroundConfig,
    pub clear_colour: wgpu::Color,
    pub debug_layer: bool,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            tank: TankConfig::default(),
            ground: GroundConfig::default(),
            clear_colour: wgpu::Color {
                r: 0.2,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
            debug_layer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_starts_with_package_version() {
        assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(VERSION.contains('-'));
    }

    #[test]
    fn build_info_mirrors_constants() {
        let info = BuildInfo::default();
        assert_eq!(info.version, VERSION);
        assert_eq!(info.dev_build, DEV_BUILD);
    }
}
