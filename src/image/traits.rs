use super::ChannelLayout;

/// Read access to a row-major interleaved raster.
pub trait ImageView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn layout(&self) -> ChannelLayout;

    /// Row `y` as `width * channels` interleaved samples.
    fn row(&self, y: usize) -> &[f32];

    fn channels(&self) -> usize {
        self.layout().channels()
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [f32];
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
