use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Head moves to the tail: the next slide comes on screen.
    Left,
    /// Tail moves to the head: the previous slide comes back.
    Right,
}

/// The slides of the displayed category. Position 0 is the one on screen.
///
/// Besides rotation the only mutation is wholesale replacement of the ring,
/// which the coordinator does by assigning a new value.
#[derive(Debug)]
pub struct SlideshowRing<T> {
    slides: VecDeque<T>,
}

impl<T> Default for SlideshowRing<T> {
    fn default() -> Self {
        Self {
            slides: VecDeque::new(),
        }
    }
}

impl<T> SlideshowRing<T> {
    pub fn new(slides: Vec<T>) -> Self {
        Self {
            slides: slides.into(),
        }
    }

    pub fn rotate(&mut self, rotation: Rotation) {
        if self.slides.len() < 2 {
            return;
        }
        match rotation {
            Rotation::Left => self.slides.rotate_left(1),
            Rotation::Right => self.slides.rotate_right(1),
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.slides.front()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slides.iter()
    }
}
