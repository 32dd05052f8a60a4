//! Whole-screen shading applied behind modal dialogs

use stipple_paint::ShadingStyle;

use crate::surface::Pixel;
use crate::target::Target;

pub(crate) fn apply<P: Pixel>(t: &mut Target<'_, P>, shading: ShadingStyle) {
    let clip = t.clip();
    if shading == ShadingStyle::None || !t.begin(clip) {
        return;
    }
    let blender = *t.blender();
    for y in clip.top..clip.bottom {
        match shading {
            ShadingStyle::Dim => t.map_span(y, clip.left, clip.right - 1, |p| blender.dim(p)),
            ShadingStyle::Luminance => {
                t.map_span(y, clip.left, clip.right - 1, |p| blender.luminance(p))
            }
            ShadingStyle::None => {}
        }
    }
}
