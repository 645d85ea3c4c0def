/// A dependency tag. Invalidating a tag drops every cached value inserted under it.
///
/// Tags are compared by [`Tag::id`] with exact string equality. An id that is
/// empty or whitespace-only is blank and never indexed.
#[cfg(feature = "tracing")]
pub trait Tag: std::fmt::Debug {
    fn id(&self) -> &str;

    fn is_blank(&self) -> bool {
        self.id().trim().is_empty()
    }
}

#[cfg(not(feature = "tracing"))]
pub trait Tag {
    fn id(&self) -> &str;

    fn is_blank(&self) -> bool {
        self.id().trim().is_empty()
    }
}

impl Tag for str {
    fn id(&self) -> &str {
        self
    }
}

impl Tag for String {
    fn id(&self) -> &str {
        self.as_str()
    }
}

impl<T> Tag for &T
where
    T: Tag + ?Sized,
{
    fn id(&self) -> &str {
        (**self).id()
    }
}

impl<T> Tag for Box<T>
where
    T: Tag + ?Sized,
{
    fn id(&self) -> &str {
        (**self).id()
    }
}
