use winit::window::Window;

/// Inline style of the canvas the web bootstrap creates: borderless and
/// covering the whole page.
pub const CANVAS_STYLE: [(&str, &str); 6] = [
    ("border", "none"),
    ("margin", "0"),
    ("padding", "0"),
    ("position", "fixed"),
    ("width", "100%"),
    ("height", "100%"),
];

/// The surface a scene is displayed on: a window on native, a canvas on the web.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySurface {
    pub width: u32,
    pub height: u32,
}

impl DisplaySurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_window(window: &Window) -> Self {
        let size = window.inner_size();
        Self::new(size.width, size.height)
    }

    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_degenerate_surface_is_one() {
        assert_eq!(DisplaySurface::new(640, 0).aspect(), 1.0);
        assert_eq!(DisplaySurface::new(0, 480).aspect(), 1.0);
        assert_eq!(DisplaySurface::new(0, 0).aspect(), 1.0);
        assert_eq!(DisplaySurface::new(800, 400).aspect(), 2.0);
    }
}
