//! Materials attached to meshes.
//!
//! - [`StandardMaterial`] is a flat diffuse colour lit by the scene's lights
//! - [`GridMaterial`] draws a procedural grid on world XZ
//! - [`MultiMaterial`] holds one material per sub-mesh of a merged mesh

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub const fn teal() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    pub name: String,
    pub diffuse: Color3,
}

impl StandardMaterial {
    pub fn new(name: &str, diffuse: Color3) -> Self {
        Self {
            name: name.to_string(),
            diffuse,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridMaterial {
    pub name: String,
    pub main_color: Color3,
    pub line_color: Color3,
    /// World units between two minor lines.
    pub grid_ratio: f32,
    /// Every n-th line is a major line.
    pub major_unit_frequency: f32,
    pub minor_unit_visibility: f32,
    pub opacity: f32,
}

impl GridMaterial {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            main_color: Color3::black(),
            line_color: Color3::teal(),
            grid_ratio: 1.0,
            major_unit_frequency: 10.0,
            minor_unit_visibility: 0.33,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiMaterial {
    pub name: String,
    pub sub_materials: Vec<Material>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Standard(StandardMaterial),
    Grid(GridMaterial),
    Multi(MultiMaterial),
}

impl Material {
    pub fn name(&self) -> &str {
        match self {
            Material::Standard(m) => &m.name,
            Material::Grid(m) => &m.name,
            Material::Multi(m) => &m.name,
        }
    }

    /// Resolves the material used by sub-mesh `index`.
    ///
    /// Single materials apply to every sub-mesh. Multi materials hand out their
    /// sub-materials and fall back to the last one when the index runs past them.
    pub fn for_sub_mesh(&self, index: usize) -> &Material {
        match self {
            Material::Multi(multi) => multi
                .sub_materials
                .get(index)
                .or(multi.sub_materials.last())
                .unwrap_or(self),
            _ => self,
        }
    }
}

impl From<StandardMaterial> for Material {
    fn from(m: StandardMaterial) -> Self {
        Material::Standard(m)
    }
}

impl From<GridMaterial> for Material {
    fn from(m: GridMaterial) -> Self {
        Material::Grid(m)
    }
}

impl From<MultiMaterial> for Material {
    fn from(m: MultiMaterial) -> Self {
        Material::Multi(m)
    }
}
