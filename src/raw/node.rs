use super::handle::Handle;
use super::size::Size;

/// A binary search tree node. Each node owns its element and links to its
/// children by handle; the subtree size (`1 + size(left) + size(right)`) is
/// kept exact by every mutation so rank queries never traverse.
#[derive(Clone)]
pub(crate) struct Node<T> {
    element: T,
    left: Option<Handle>,
    right: Option<Handle>,
    size: Size,
}

impl<T> Node<T> {
    /// Creates a detached leaf holding `element`.
    pub(crate) const fn new(element: T) -> Self {
        Self {
            element,
            left: None,
            right: None,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn element(&self) -> &T {
        &self.element
    }

    pub(crate) fn into_element(self) -> T {
        self.element
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) const fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) const fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Detaches and returns both children.
    pub(crate) const fn take_children(&mut self) -> (Option<Handle>, Option<Handle>) {
        (self.left.take(), self.right.take())
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size.to_usize()
    }

    pub(crate) const fn set_size(&mut self, size: usize) {
        self.size = Size::from_usize(size);
    }
}
