//! Recursion context for the schema builder

/// One step of a location in the document
///
/// Keys are kept whole, so `{"a.b": ..}` and `{"a": {"b": ..}}` never share
/// a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Value under a record key
    Key(String),
    /// Element of a list
    Element,
}

/// Per-call context threaded through recursive descent
///
/// A trace lives on the stack of the call that created it. Children borrow
/// their parent, so a trace can never outlive the branch it describes.
#[derive(Debug)]
pub struct Trace<'a> {
    name: &'a str,
    level: usize,
    nesting: usize,
    path: String,
    steps: Vec<PathStep>,
    parent: Option<&'a Trace<'a>>,
}

impl<'a> Trace<'a> {
    /// Trace for a record at the document root
    pub fn root(name: &'a str) -> Self {
        Self {
            name,
            level: 0,
            nesting: 0,
            path: name.to_string(),
            steps: Vec::new(),
            parent: None,
        }
    }

    /// Trace for a list at the document root
    pub fn root_list(name: &'a str) -> Self {
        Self {
            nesting: 1,
            ..Self::root(name)
        }
    }

    /// Record-valued field: one level deeper, list nesting reset
    pub fn record_field(&'a self, key: &'a str) -> Trace<'a> {
        Trace {
            name: key,
            level: self.level + 1,
            nesting: 0,
            path: format!("{}.{key}", self.path),
            steps: self.step(PathStep::Key(key.to_string())),
            parent: Some(self),
        }
    }

    /// List-valued field: same level, one more enclosing list
    pub fn list_field(&'a self, key: &'a str) -> Trace<'a> {
        Trace {
            name: key,
            level: self.level,
            nesting: self.nesting + 1,
            path: format!("{}.{key}", self.path),
            steps: self.step(PathStep::Key(key.to_string())),
            parent: Some(self),
        }
    }

    /// Record element of the list this trace describes
    pub fn element_record(&'a self) -> Trace<'a> {
        Trace {
            name: self.name,
            level: self.level,
            nesting: 0,
            path: format!("{}[]", self.path),
            steps: self.step(PathStep::Element),
            parent: Some(self),
        }
    }

    /// List element of the list this trace describes
    pub fn element_list(&'a self) -> Trace<'a> {
        Trace {
            name: self.name,
            level: self.level,
            nesting: self.nesting + 1,
            path: format!("{}[]", self.path),
            steps: self.step(PathStep::Element),
            parent: Some(self),
        }
    }

    /// Candidate record name
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn nesting(&self) -> usize {
        self.nesting
    }

    /// Dotted location in the document, e.g. `Root.items[].zip`
    ///
    /// Meant for diagnostics; keys containing dots make it ambiguous.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Location below the root as structured steps
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    fn step(&self, step: PathStep) -> Vec<PathStep> {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        steps
    }

    /// Location of a key directly under this trace
    pub fn child_path(&self, key: &str) -> String {
        format!("{}.{key}", self.path)
    }

    pub fn parent(&self) -> Option<&'a Trace<'a>> {
        self.parent
    }

    /// Number of traces above this one
    pub fn depth(&self) -> usize {
        self.parent.map_or(0, |parent| parent.depth() + 1)
    }
}
