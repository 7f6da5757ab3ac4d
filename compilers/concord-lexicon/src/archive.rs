use std::collections::HashMap;

use concord_protocol::{ArchivedLexicon, Group, GroupId, Lemma, LemmaId, Lexicon, Member};
use rkyv::AlignedVec;

use crate::error::{LexiconError, Result};
use crate::index::{DuplicatePolicy, GroupIndex, GroupIndexBuilder};

impl GroupIndex {
    /// Flattens the index into the archivable lexicon model.
    /// Members keep their load order so a reload rebuilds the same lemma map.
    pub fn to_lexicon(&self) -> Lexicon {
        let mut lemmas: Vec<Lemma> = Vec::new();
        let mut lemma_ids: HashMap<&str, LemmaId> = HashMap::new();
        let mut groups = Vec::with_capacity(self.groups().len());

        for (i, group) in self.groups().iter().enumerate() {
            let mut members = Vec::new();
            for (form, lemma) in group.entries() {
                let id = match lemma_ids.get(lemma) {
                    Some(id) => *id,
                    None => {
                        let id = LemmaId::new(lemmas.len() as u32);
                        lemmas.push(Lemma { id, text: lemma.to_string() });
                        lemma_ids.insert(lemma, id);
                        id
                    }
                };
                members.push(Member { form: form.to_string(), lemma: id });
            }
            groups.push(Group {
                id: GroupId::new(i as u32),
                name: group.name().to_string(),
                members,
            });
        }

        Lexicon {
            version: Lexicon::VERSION,
            lemmas,
            groups,
        }
    }

    /// Rebuilds an index from an archived lexicon.
    pub fn from_lexicon(lexicon: &ArchivedLexicon, policy: DuplicatePolicy) -> Result<Self> {
        if lexicon.version != Lexicon::VERSION {
            return Err(LexiconError::Version {
                found: lexicon.version,
                expected: Lexicon::VERSION,
            });
        }

        let mut builder = GroupIndexBuilder::new(policy);
        for group in lexicon.groups.iter() {
            let name = group.name.as_str();
            builder.add_group(name);

            for member in group.members.iter() {
                let id = LemmaId::new(member.lemma.0);
                let lemma = lexicon
                    .lemmas
                    .get(id.index())
                    .filter(|l| l.id.0 == id.0)
                    .ok_or_else(|| LexiconError::UnknownLemma {
                        group: name.to_string(),
                        form: member.form.as_str().to_string(),
                        id: id.0,
                    })?;
                builder.add_lemma_forms(name, lemma.text.as_str(), [member.form.as_str()])?;
            }
        }
        Ok(builder.build())
    }
}

/// Serializes the index to an rkyv lexicon blob.
pub fn compile(index: &GroupIndex) -> Result<AlignedVec> {
    rkyv::to_bytes::<_, 4096>(&index.to_lexicon()).map_err(|e| LexiconError::Archive(e.to_string()))
}

/// Validates and loads a blob produced by [`compile`].
pub fn load_compiled(bytes: &[u8], policy: DuplicatePolicy) -> Result<GroupIndex> {
    // check_archived_root needs the buffer aligned for the archived types.
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let lexicon = rkyv::check_archived_root::<Lexicon>(&aligned)
        .map_err(|e| LexiconError::Archive(e.to_string()))?;
    GroupIndex::from_lexicon(lexicon, policy)
}
