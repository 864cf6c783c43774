use std::ops::{Deref, DerefMut};

use symcanvas_core::{Shape, Style, Symbol};

/// The drawing backend the scene pipeline renders onto.
///
/// Shapes are queued as named layers by `draw_shape` and only become
/// visible on `commit_layers`, in the order they were queued. Queueing the
/// same name twice before a commit is a caller error.
pub trait CanvasSurface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Push the current transform.
    fn save_transform(&mut self);

    /// Pop back to the transform of the matching `save_transform`.
    fn restore_transform(&mut self);

    /// Offset every subsequent draw by `(dx, dy)` until the next restore.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Queue one shape as a layer.
    fn draw_shape(&mut self, name: &str, shape: &Shape, style: &Style);

    /// Flush all queued layers to the visible surface.
    fn commit_layers(&mut self);

    fn draw_symbol(&mut self, symbol: &Symbol) {
        self.draw_shape(symbol.name(), symbol.shape(), symbol.style());
    }
}

/// Saves the surface transform on creation and restores it on drop, so the
/// restore happens on every exit path.
pub struct TransformScope<'a, S: CanvasSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: CanvasSurface + ?Sized> TransformScope<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save_transform();
        Self { surface }
    }
}

impl<S: CanvasSurface + ?Sized> Deref for TransformScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: CanvasSurface + ?Sized> DerefMut for TransformScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: CanvasSurface + ?Sized> Drop for TransformScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore_transform();
    }
}
