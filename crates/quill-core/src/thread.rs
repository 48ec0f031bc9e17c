//! Two-level thread reconstruction.
//!
//! Storage hands back every comment of a post as one flat list, newest first.
//! [`reconstruct`] partitions that list by parent in a single pass and hangs
//! each reply under its top-level comment. Replies whose parent is not a
//! top-level comment of the input (deleted, never existed, or itself a reply)
//! are left out of the tree. They stay in storage and are simply never shown.

use std::collections::HashMap;

use uuid::Uuid;

/// A record that can be placed into a thread.
pub trait Threaded {
    /// Identifier other records refer to as their parent.
    fn thread_id(&self) -> Uuid;

    /// Parent identifier, `None` for top-level records.
    fn parent_id(&self) -> Option<Uuid>;

    /// Returns whether this record has no parent.
    #[inline]
    fn is_top_level(&self) -> bool {
        self.parent_id().is_none()
    }
}

/// A top-level record together with its direct replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread<T> {
    /// The top-level record.
    pub root: T,
    /// Direct replies, in the order they appeared in the input.
    pub replies: Vec<T>,
}

impl<T> Thread<T> {
    /// Creates a thread without replies.
    pub fn new(root: T) -> Self {
        Self {
            root,
            replies: Vec::new(),
        }
    }

    /// Converts the root and every reply with `f`.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Thread<U> {
        Thread {
            root: f(self.root),
            replies: self.replies.into_iter().map(f).collect(),
        }
    }

    /// Returns the number of records in the thread, root included.
    #[inline]
    pub fn len(&self) -> usize {
        1 + self.replies.len()
    }

    /// Always `false`, a thread holds at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Rebuilds threads from a flat list.
///
/// Top-level records keep their input order, and so do the replies attached
/// to each of them. Runs in `O(n)`.
pub fn reconstruct<T, I>(records: I) -> Vec<Thread<T>>
where
    T: Threaded,
    I: IntoIterator<Item = T>,
{
    let mut roots = Vec::new();
    let mut replies: HashMap<Uuid, Vec<T>> = HashMap::new();

    for record in records {
        match record.parent_id() {
            None => roots.push(record),
            Some(parent_id) => replies.entry(parent_id).or_default().push(record),
        }
    }

    // Whatever is left in `replies` afterwards is orphaned and dropped.
    roots
        .into_iter()
        .map(|root| {
            let replies = replies.remove(&root.thread_id()).unwrap_or_default();
            Thread { root, replies }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id: Uuid,
        parent_id: Option<Uuid>,
        content: &'static str,
    }

    impl Row {
        fn top(content: &'static str) -> Self {
            Self {
                id: Uuid::new_v4(),
                parent_id: None,
                content,
            }
        }

        fn reply(parent: &Row, content: &'static str) -> Self {
            Self {
                id: Uuid::new_v4(),
                parent_id: Some(parent.id),
                content,
            }
        }
    }

    impl Threaded for Row {
        fn thread_id(&self) -> Uuid {
            self.id
        }

        fn parent_id(&self) -> Option<Uuid> {
            self.parent_id
        }
    }

    fn contents(thread: &Thread<Row>) -> Vec<&'static str> {
        thread.replies.iter().map(|r| r.content).collect()
    }

    #[test]
    fn newest_first_example() {
        let a = Row::top("hi");
        let b = Row::reply(&a, "hey");
        let c = Row::top("yo");

        let threads = reconstruct(vec![c.clone(), b.clone(), a.clone()]);

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].root, c);
        assert!(threads[0].replies.is_empty());
        assert_eq!(threads[1].root, a);
        assert_eq!(threads[1].replies, vec![b]);
    }

    #[test]
    fn empty_input() {
        let threads = reconstruct(Vec::<Row>::new());
        assert!(threads.is_empty());
    }

    #[test]
    fn replies_keep_input_order() {
        let a = Row::top("a");
        let r3 = Row::reply(&a, "third");
        let r2 = Row::reply(&a, "second");
        let r1 = Row::reply(&a, "first");

        let threads = reconstruct(vec![r3, r2, a, r1]);

        assert_eq!(threads.len(), 1);
        assert_eq!(contents(&threads[0]), vec!["third", "second", "first"]);
    }

    #[test]
    fn each_reply_under_exactly_one_parent() {
        let a = Row::top("a");
        let b = Row::top("b");
        let ra = Row::reply(&a, "to a");
        let rb = Row::reply(&b, "to b");

        let threads = reconstruct(vec![rb, ra, b, a]);

        assert_eq!(contents(&threads[0]), vec!["to b"]);
        assert_eq!(contents(&threads[1]), vec!["to a"]);
        let total: usize = threads.iter().map(Thread::len).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn orphans_are_dropped() {
        let deleted = Row::top("deleted");
        let orphan = Row::reply(&deleted, "orphan");
        let a = Row::top("a");

        let threads = reconstruct(vec![orphan, a.clone()]);

        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].root, a);
        assert!(threads[0].replies.is_empty());
    }

    #[test]
    fn nested_replies_are_not_materialized() {
        let a = Row::top("a");
        let b = Row::reply(&a, "b");
        let c = Row::reply(&b, "c");

        let threads = reconstruct(vec![c, b, a]);

        assert_eq!(threads.len(), 1);
        assert_eq!(contents(&threads[0]), vec!["b"]);
    }

    #[test]
    fn map_converts_root_and_replies() {
        let a = Row::top("a");
        let b = Row::reply(&a, "b");

        let threads = reconstruct(vec![b, a]);
        let mapped = threads
            .into_iter()
            .map(|t| t.map(|r| r.content))
            .collect::<Vec<_>>();

        assert_eq!(mapped[0].root, "a");
        assert_eq!(mapped[0].replies, vec!["b"]);
    }
}
