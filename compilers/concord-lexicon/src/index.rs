use std::collections::{BTreeMap, BTreeSet, HashMap};

use concord_text::normalize_form;

use crate::error::{LexiconError, Result};

/// What to do when one word-form is listed under two different lemmas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DuplicatePolicy {
    /// The lemma file read last owns the form. A warning is logged.
    #[default]
    LastWins,
    /// Fail construction with [`LexiconError::ConflictingLemma`].
    Reject,
}

/// A named set of word-forms.
#[derive(Debug, Clone, Default)]
pub struct Group {
    name: String,
    /// Accent-free forms, case as written in the lemma files.
    forms: BTreeSet<String>,
    /// Lowercased form -> lemma, scoped to this group.
    lemmas: HashMap<String, String>,
    /// (form, lemma) pairs in load order; replayed when compiling.
    entries: Vec<(String, String)>,
}

impl Group {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn forms(&self) -> &BTreeSet<String> {
        &self.forms
    }

    /// `key` is a lowercased form, as built by [`concord_text::match_key`].
    pub fn contains(&self, key: &str) -> bool {
        self.lemmas.contains_key(key)
    }

    pub fn lemma(&self, key: &str) -> Option<&str> {
        self.lemmas.get(key).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, l)| (f.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// A group containing a looked-up token.
#[derive(Debug, Clone, Copy)]
pub struct GroupMatch<'a> {
    pub group: &'a Group,
    pub lemma: &'a str,
}

/// Read-only lookup from word-forms to the groups and lemmas they belong to.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: Vec<Group>,
    word_to_lemma: HashMap<String, String>,
}

impl GroupIndex {
    /// Groups sorted by name.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups
            .binary_search_by(|g| g.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.groups[i])
    }

    /// Flat form -> lemma map across all groups.
    pub fn word_to_lemma(&self) -> &HashMap<String, String> {
        &self.word_to_lemma
    }

    pub fn lemma_of(&self, key: &str) -> Option<&str> {
        self.word_to_lemma.get(key).map(String::as_str)
    }

    /// Groups (in name order) containing `token`, each with the lemma it reports.
    ///
    /// The token is only lowercased: accents are stripped from wordlist forms,
    /// never from corpus text. A listed `rosé` is stored as `rose` and the
    /// token `rosé` does not reach it.
    pub fn matches<'a>(&'a self, token: &str) -> impl Iterator<Item = GroupMatch<'a>> + 'a {
        let key = token.to_lowercase();
        self.groups
            .iter()
            .filter_map(move |group| group.lemma(&key).map(|lemma| GroupMatch { group, lemma }))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Group::is_empty)
    }
}

pub struct GroupIndexBuilder {
    policy: DuplicatePolicy,
    groups: BTreeMap<String, Group>,
    word_to_lemma: HashMap<String, String>,
}

impl GroupIndexBuilder {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            groups: BTreeMap::new(),
            word_to_lemma: HashMap::new(),
        }
    }

    /// Registers `name` even if no forms are ever added to it.
    pub fn add_group(&mut self, name: &str) -> &mut Self {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(name));
        self
    }

    /// Adds the forms of one lemma file to `group`. Blank forms are skipped.
    pub fn add_lemma_forms<I, S>(&mut self, group: &str, lemma: &str, forms: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_group(group);

        for raw in forms {
            let form = normalize_form(raw.as_ref());
            if form.is_empty() {
                continue;
            }
            let key = form.to_lowercase();

            if let Some(previous) = self.word_to_lemma.get(&key) {
                if previous != lemma {
                    match self.policy {
                        DuplicatePolicy::Reject => {
                            return Err(LexiconError::ConflictingLemma {
                                form: key,
                                previous: previous.clone(),
                                lemma: lemma.to_string(),
                            });
                        }
                        DuplicatePolicy::LastWins => {
                            tracing::warn!(
                                form = %key,
                                previous = %previous,
                                lemma = %lemma,
                                "form listed under two lemmas, keeping the last"
                            );
                        }
                    }
                }
            }
            self.word_to_lemma.insert(key.clone(), lemma.to_string());

            // add_group above guarantees the entry exists.
            if let Some(entry) = self.groups.get_mut(group) {
                entry.lemmas.insert(key, lemma.to_string());
                entry.entries.push((form.clone(), lemma.to_string()));
                entry.forms.insert(form);
            }
        }
        Ok(self)
    }

    pub fn build(self) -> GroupIndex {
        GroupIndex {
            groups: self.groups.into_values().collect(),
            word_to_lemma: self.word_to_lemma,
        }
    }
}
