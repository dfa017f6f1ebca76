// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// An opaque handle to one binary decision variable.
///
/// Handles are dense positions assigned by whoever builds the
/// [`IlpProblem`](crate::problem::IlpProblem); the meaning of a handle
/// (which decision it stands for) is owned by that builder, not by this
/// crate. Handles carry no textual name, so there is nothing to stringify,
/// parse back, or collide.
///
/// # Examples
///
/// ```rust
/// use sleigh_ilp::var::VarId;
///
/// let v = VarId::new(3);
/// assert_eq!(v.get(), 3);
/// assert_eq!(format!("{}", v), "VarId(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Creates a new handle from a dense position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying dense position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VarId({})", self.0)
    }
}

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VarId({})", self.0)
    }
}

impl From<usize> for VarId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<VarId> for usize {
    fn from(var: VarId) -> Self {
        var.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_get_and_conversions() {
        let v = VarId::new(9);
        assert_eq!(v.get(), 9);

        let v: VarId = 4.into();
        let raw: usize = v.into();
        assert_eq!(raw, 4);
    }
}
