//! Lighting configuration and per-view light sampling.
//!
//! Lighting bounds are an explicit value object, not process-wide state, so
//! two jobs with different lighting can run from the same process.

use serde::{Deserialize, Serialize};
use synthview_pose::camera_position;

use crate::job::PointLight;
use crate::rng::DeterministicRng;

/// Bounds for environment and point-light placement.
///
/// Point lights are positioned with the same spherical parameterization as
/// the camera: azimuth/elevation in degrees and a distance from the object
/// center. Energies are in Blender lamp units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Minimum number of point lights per view.
    pub light_num_lowbound: u32,
    /// Maximum number of point lights per view.
    pub light_num_highbound: u32,
    /// Minimum point-light distance.
    pub light_dist_lowbound: f64,
    /// Maximum point-light distance.
    pub light_dist_highbound: f64,
    /// Minimum point-light azimuth, degrees.
    pub light_azimuth_lowbound: f64,
    /// Maximum point-light azimuth, degrees.
    pub light_azimuth_highbound: f64,
    /// Minimum point-light elevation, degrees.
    pub light_elevation_lowbound: f64,
    /// Maximum point-light elevation, degrees.
    pub light_elevation_highbound: f64,
    /// Mean point-light energy.
    pub light_energy_mean: f64,
    /// Standard deviation of point-light energy.
    pub light_energy_std: f64,
    /// Minimum environment-light energy.
    pub environment_energy_lowbound: f64,
    /// Maximum environment-light energy.
    pub environment_energy_highbound: f64,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_num_lowbound: 0,
            light_num_highbound: 6,
            light_dist_lowbound: 8.0,
            light_dist_highbound: 20.0,
            light_azimuth_lowbound: 0.0,
            light_azimuth_highbound: 360.0,
            light_elevation_lowbound: -90.0,
            light_elevation_highbound: 90.0,
            light_energy_mean: 2.0,
            light_energy_std: 2.0,
            environment_energy_lowbound: 0.0,
            environment_energy_highbound: 1.0,
        }
    }
}

/// The lighting for one rendered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewLighting {
    /// Environment-light energy.
    pub environment_energy: f64,
    /// Point lights to place in the scene.
    pub lights: Vec<PointLight>,
}

impl LightingConfig {
    /// Deterministic lighting: a single point light at the lower placement
    /// bounds with the mean energy, and the maximum environment energy.
    pub fn fixed(&self) -> ViewLighting {
        let location = camera_position(
            self.light_dist_lowbound,
            self.light_azimuth_lowbound,
            self.light_elevation_lowbound,
        );
        ViewLighting {
            environment_energy: self.environment_energy_highbound,
            lights: vec![PointLight {
                location: location.to_array(),
                energy: self.light_energy_mean,
            }],
        }
    }

    /// Samples randomized lighting within the configured bounds.
    pub fn sample(&self, rng: &mut DeterministicRng) -> ViewLighting {
        let environment_energy = uniform(
            rng,
            self.environment_energy_lowbound,
            self.environment_energy_highbound,
        );
        let count = rng.gen_range(self.light_num_lowbound..=self.light_num_highbound);
        let lights = (0..count)
            .map(|_| {
                let azimuth = uniform(rng, self.light_azimuth_lowbound, self.light_azimuth_highbound);
                let elevation = uniform(
                    rng,
                    self.light_elevation_lowbound,
                    self.light_elevation_highbound,
                );
                let distance = uniform(rng, self.light_dist_lowbound, self.light_dist_highbound);
                // Normal samples can go negative; a lamp energy cannot.
                let energy = rng.gen_normal(self.light_energy_mean, self.light_energy_std).max(0.0);
                PointLight {
                    location: camera_position(distance, azimuth, elevation).to_array(),
                    energy,
                }
            })
            .collect();
        ViewLighting {
            environment_energy,
            lights,
        }
    }
}

fn uniform(rng: &mut DeterministicRng, low: f64, high: f64) -> f64 {
    if high <= low {
        low
    } else {
        rng.gen_range(low..high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let config = LightingConfig::default();
        assert_eq!(config.light_num_highbound, 6);
        assert_eq!(config.light_dist_lowbound, 8.0);
        assert_eq!(config.light_dist_highbound, 20.0);
        assert_eq!(config.light_energy_mean, 2.0);
        assert_eq!(config.environment_energy_highbound, 1.0);
    }

    #[test]
    fn test_fixed_lighting_is_single_light_at_lowbounds() {
        let config = LightingConfig::default();
        let lighting = config.fixed();
        assert_eq!(lighting.environment_energy, 1.0);
        assert_eq!(lighting.lights.len(), 1);
        assert_eq!(lighting.lights[0].energy, 2.0);
        // Azimuth 0, elevation -90: straight below at the lower distance.
        let [x, y, z] = lighting.lights[0].location;
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
        assert!((z + 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_respects_bounds() {
        let config = LightingConfig::default();
        let mut rng = DeterministicRng::new(123);
        for _ in 0..50 {
            let lighting = config.sample(&mut rng);
            assert!(lighting.environment_energy >= 0.0);
            assert!(lighting.environment_energy < 1.0);
            assert!(lighting.lights.len() <= 6);
            for light in &lighting.lights {
                let [x, y, z] = light.location;
                let dist = (x * x + y * y + z * z).sqrt();
                assert!(dist >= 8.0 - 1e-9 && dist <= 20.0 + 1e-9);
                assert!(light.energy >= 0.0);
            }
        }
    }

    #[test]
    fn test_sample_is_deterministic_for_a_seed() {
        let config = LightingConfig::default();
        let a = config.sample(&mut DeterministicRng::new(9));
        let b = config.sample(&mut DeterministicRng::new(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_serde_round_trip_with_defaults() {
        let config: LightingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LightingConfig::default());

        let json = serde_json::to_string(&LightingConfig::default()).unwrap();
        let back: LightingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LightingConfig::default());
    }
}
