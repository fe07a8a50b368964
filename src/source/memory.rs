//! In-memory source
//!
//! Holds the handful of Redis value kinds NodeBB uses, keyed like the real
//! store. Sorted sets keep insertion order as their scan order.

use std::collections::{BTreeSet, HashMap};

use super::{ForumSource, SourceError};

#[derive(Debug, Clone)]
enum Value {
    Hash(HashMap<String, String>),
    Set(BTreeSet<String>),
    SortedSet(Vec<(String, f64)>),
}

/// In-memory forum store
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, Value>,
}

/// Matches a Redis glob pattern supporting `*` and `?`
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&c| c == '*')
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a hash field, creating the hash if needed
    pub fn hset(&mut self, key: &str, field: &str, value: &str) -> &mut Self {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Hash(HashMap::new()));
        if let Value::Hash(fields) = entry {
            fields.insert(field.to_string(), value.to_string());
        }
        self
    }

    /// Adds a member to a set, creating the set if needed
    pub fn sadd(&mut self, key: &str, member: &str) -> &mut Self {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Set(BTreeSet::new()));
        if let Value::Set(members) = entry {
            members.insert(member.to_string());
        }
        self
    }

    /// Adds or rescores a sorted set member
    pub fn zadd(&mut self, key: &str, member: &str, score: f64) -> &mut Self {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::SortedSet(Vec::new()));
        if let Value::SortedSet(members) = entry {
            match members.iter_mut().find(|(m, _)| m == member) {
                Some(existing) => existing.1 = score,
                None => members.push((member.to_string(), score)),
            }
        }
        self
    }

    fn wrong_type(key: &str) -> SourceError {
        SourceError::WrongType { key: key.to_string() }
    }
}

impl ForumSource for MemorySource {
    fn keys(&mut self, pattern: &str) -> Result<Vec<String>, SourceError> {
        let mut keys: Vec<String> = self
            .entries
            .keys()
            .filter(|k| glob_match(pattern, k))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn hash_field(&mut self, key: &str, field: &str) -> Result<Option<String>, SourceError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::Hash(fields)) => Ok(fields.get(field).cloned()),
            Some(_) => Err(Self::wrong_type(key)),
        }
    }

    fn hash_all(&mut self, key: &str) -> Result<HashMap<String, String>, SourceError> {
        match self.entries.get(key) {
            None => Ok(HashMap::new()),
            Some(Value::Hash(fields)) => Ok(fields.clone()),
            Some(_) => Err(Self::wrong_type(key)),
        }
    }

    fn set_members(&mut self, key: &str) -> Result<Vec<String>, SourceError> {
        match self.entries.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(_) => Err(Self::wrong_type(key)),
        }
    }

    fn sorted_set_scan(&mut self, key: &str) -> Result<Vec<(String, f64)>, SourceError> {
        match self.entries.get(key) {
            None => Ok(Vec::new()),
            Some(Value::SortedSet(members)) => Ok(members.clone()),
            Some(_) => Err(Self::wrong_type(key)),
        }
    }
}
