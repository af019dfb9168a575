use hexcat_core::{BoardGeometry, BoardView, SurfaceSize};

/// The drawing collaborator the render loop presents frames to.
pub trait Surface: Send + 'static {
    /// Size of the drawable area, `None` while no drawable surface is
    /// available. Frames are skipped until it comes back.
    fn dimensions(&self) -> Option<SurfaceSize>;

    /// Draws one frame. `geometry` is the same layout taps are mapped with.
    fn present(&mut self, view: &BoardView, geometry: &BoardGeometry);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn dimensions(&self) -> Option<SurfaceSize> {
        (**self).dimensions()
    }

    fn present(&mut self, view: &BoardView, geometry: &BoardGeometry) {
        (**self).present(view, geometry)
    }
}
