//! Domain objects the diagram is built from
//!
//! A [`Sort`] is a named group of [`Process`]es. The diagram only reads
//! names and the process order; in return it tells every process which
//! element draws it, through a lookup-only [`ElementHandle`] that is cleared
//! when the owning container goes away.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Position of a container inside its diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub usize);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the element drawing a process lives: container plus list index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    pub container: ContainerId,
    pub index: usize,
}

/// A process: the leaf of the domain model
#[derive(Debug)]
pub struct Process {
    name: String,
    element: Cell<Option<ElementHandle>>,
}

impl Process {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            element: Cell::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element currently drawing this process, if any
    pub fn element(&self) -> Option<ElementHandle> {
        self.element.get()
    }

    pub(crate) fn bind_element(&self, handle: ElementHandle) {
        self.element.set(Some(handle));
    }

    /// Forget the element, but only if it belongs to `container`
    pub(crate) fn release_element(&self, container: ContainerId) {
        if self.element.get().map(|h| h.container) == Some(container) {
            self.element.set(None);
        }
    }
}

/// A sort: a named, ordered list of processes
#[derive(Debug)]
pub struct Sort {
    name: String,
    processes: Vec<Rc<Process>>,
}

impl Sort {
    pub fn new(name: impl Into<String>, processes: Vec<Rc<Process>>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            processes,
        })
    }

    /// Build a sort and its processes from plain names
    pub fn with_process_names<I, S>(name: impl Into<String>, process_names: I) -> Rc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let processes = process_names.into_iter().map(Process::new).collect();
        Self::new(name, processes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn processes(&self) -> &[Rc<Process>] {
        &self.processes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_keeps_process_order() {
        let sort = Sort::with_process_names("a", ["a0", "a1", "a2"]);
        let names: Vec<&str> = sort.processes().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["a0", "a1", "a2"]);
    }

    #[test]
    fn test_release_only_own_container() {
        let process = Process::new("p");
        let handle = ElementHandle {
            container: ContainerId(1),
            index: 0,
        };
        process.bind_element(handle);

        process.release_element(ContainerId(2));
        assert_eq!(process.element(), Some(handle));

        process.release_element(ContainerId(1));
        assert_eq!(process.element(), None);
    }
}
