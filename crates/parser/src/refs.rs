//! Local `$ref` resolution
//!
//! Only same-document references (`#/definitions/Pet`,
//! `#/components/schemas/Pet`) are followed. External references and cycles
//! are left in place as `{"$ref": ...}` objects.
//!
//! Expansions that do not depend on the enclosing references are memoized, and
//! one [`RefResolver::inline`] call stops expanding references once it has
//! produced [`MAX_INLINED_NODES`] nodes.

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Depth after which nested schemas are no longer inlined
const MAX_DEPTH: usize = 32;

/// Node budget of a single `inline` call
const MAX_INLINED_NODES: usize = 100_000;

pub(crate) struct RefResolver<'a> {
    root: &'a Value,
    expanded: RefCell<HashMap<String, Expansion>>,
}

#[derive(Debug, Clone)]
struct Expansion {
    value: Value,
    nodes: usize,
}

struct Walk {
    stack: Vec<String>,
    remaining: usize,
}

/// Result of inlining one node
struct Inlined {
    value: Value,
    nodes: usize,
    /// Lowest stack position a cycle cut pointed at, `usize::MAX` if none
    floor: usize,
    /// The node budget ran out somewhere below
    truncated: bool,
}

impl Inlined {
    fn leaf(value: Value) -> Self {
        Self {
            value,
            nodes: 1,
            floor: usize::MAX,
            truncated: false,
        }
    }

    fn absorb(&mut self, child: Inlined) -> Value {
        self.nodes += child.nodes;
        self.floor = self.floor.min(child.floor);
        self.truncated |= child.truncated;
        child.value
    }
}

impl<'a> RefResolver<'a> {
    pub(crate) fn new(root: &'a Value) -> Self {
        Self {
            root,
            expanded: RefCell::new(HashMap::new()),
        }
    }

    /// Look up a local reference like `#/components/schemas/Pet`
    pub(crate) fn lookup(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(self.root);
        }
        self.root.pointer(pointer)
    }

    /// Follow `$ref` chains at the top level only
    pub(crate) fn shallow(&self, value: &'a Value) -> &'a Value {
        let mut current = value;
        let mut seen = HashSet::new();
        while let Some(reference) = ref_of(current) {
            if !seen.insert(reference) {
                break;
            }
            match self.lookup(reference) {
                Some(target) => current = target,
                None => break,
            }
        }
        current
    }

    /// Inline every resolvable reference inside `value`
    pub(crate) fn inline(&self, value: &Value) -> Value {
        let mut walk = Walk {
            stack: Vec::new(),
            remaining: MAX_INLINED_NODES,
        };
        self.inline_with(value, &mut walk).value
    }

    fn inline_with(&self, value: &Value, walk: &mut Walk) -> Inlined {
        if walk.remaining == 0 {
            let mut cut = Inlined::leaf(value.clone());
            cut.truncated = true;
            return cut;
        }
        if walk.stack.len() >= MAX_DEPTH {
            return Inlined::leaf(value.clone());
        }

        match value {
            Value::Object(map) => {
                if let Some(reference) = ref_of(value) {
                    return self.inline_reference(value, reference, walk);
                }

                walk.remaining -= 1;
                let mut folded = Inlined::leaf(Value::Null);
                let mut inlined = Map::new();
                for (key, child) in map {
                    let child = self.inline_with(child, walk);
                    inlined.insert(key.clone(), folded.absorb(child));
                }
                folded.value = Value::Object(inlined);
                folded
            }
            Value::Array(items) => {
                walk.remaining -= 1;
                let mut folded = Inlined::leaf(Value::Null);
                let mut inlined = Vec::with_capacity(items.len());
                for child in items {
                    let child = self.inline_with(child, walk);
                    inlined.push(folded.absorb(child));
                }
                folded.value = Value::Array(inlined);
                folded
            }
            other => {
                walk.remaining -= 1;
                Inlined::leaf(other.clone())
            }
        }
    }

    fn inline_reference(&self, value: &Value, reference: &str, walk: &mut Walk) -> Inlined {
        if let Some(position) = walk.stack.iter().position(|r| r == reference) {
            let mut cut = Inlined::leaf(value.clone());
            cut.floor = position;
            return cut;
        }
        let Some(target) = self.lookup(reference) else {
            return Inlined::leaf(value.clone());
        };

        let known = self.expanded.borrow().get(reference).cloned();
        if let Some(known) = known {
            if known.nodes > walk.remaining {
                let mut cut = Inlined::leaf(value.clone());
                cut.truncated = true;
                return cut;
            }
            walk.remaining -= known.nodes;
            return Inlined {
                value: known.value,
                nodes: known.nodes,
                floor: usize::MAX,
                truncated: false,
            };
        }

        let position = walk.stack.len();
        walk.stack.push(reference.to_string());
        let mut resolved = self.inline_with(target, walk);
        walk.stack.pop();

        // Cuts pointing at this reference or deeper are internal to it
        if resolved.floor >= position {
            resolved.floor = usize::MAX;
            if !resolved.truncated {
                self.expanded.borrow_mut().insert(
                    reference.to_string(),
                    Expansion {
                        value: resolved.value.clone(),
                        nodes: resolved.nodes,
                    },
                );
            }
        }
        resolved
    }
}

fn ref_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}
