use tank_playground::surface::{CANVAS_STYLE, DisplaySurface};

#[test]
fn canvas_covers_the_page_without_decoration() {
    let style: std::collections::HashMap<_, _> = CANVAS_STYLE.into_iter().collect();
    assert_eq!(style.len(), CANVAS_STYLE.len());
    assert_eq!(style["border"], "none");
    assert_eq!(style["margin"], "0");
    assert_eq!(style["padding"], "0");
    assert_eq!(style["position"], "fixed");
    assert_eq!(style["width"], "100%");
    assert_eq!(style["height"], "100%");
}

#[test]
fn surface_aspect_is_width_over_height() {
    assert_eq!(DisplaySurface::new(1920, 1080).aspect(), 1920.0 / 1080.0);
}
