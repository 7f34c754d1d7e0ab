//! Image carousel cursor for the open specimen

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    index: usize,
}

impl Gallery {
    /// Cursor starts on the first image
    pub fn new(images: Vec<String>) -> Self {
        Self { images, index: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    pub fn next(&mut self) {
        if self.images.len() > 1 {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    pub fn previous(&mut self) {
        if self.images.len() > 1 {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
        }
    }

    /// Thumbnail click; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.index = index;
            true
        } else {
            false
        }
    }
}
