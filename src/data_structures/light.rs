use cgmath::Vector3;

use crate::data_structures::material::Color3;

/// Sky/ground light: surfaces facing `direction` get `diffuse`, surfaces facing
/// away get `ground_color`, everything in between is blended.
#[derive(Clone, Debug, PartialEq)]
pub struct HemisphericLight {
    pub name: String,
    pub direction: Vector3<f32>,
    pub intensity: f32,
    pub diffuse: Color3,
    pub ground_color: Color3,
}

impl HemisphericLight {
    pub fn new(name: &str, direction: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            direction,
            intensity: 1.0,
            diffuse: Color3::white(),
            ground_color: Color3::black(),
        }
    }
}
