use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LexiconError, Result};
use crate::index::{DuplicatePolicy, GroupIndex, GroupIndexBuilder};

/// Loads a wordlist tree: `root/<group>/<lemma>.<ext>`, one form per line.
///
/// Groups and lemma files are read in sorted path order, which is also the
/// order that decides `LastWins` conflicts. Hidden entries are ignored.
pub fn load_groups(root: impl AsRef<Path>, policy: DuplicatePolicy) -> Result<GroupIndex> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(LexiconError::NotADirectory(root.to_path_buf()));
    }

    let mut builder = GroupIndexBuilder::new(policy);
    for group_dir in sorted_entries(root, EntryKind::Dir)? {
        let group = base_name(&group_dir);
        builder.add_group(&group);

        for lemma_file in sorted_entries(&group_dir, EntryKind::File)? {
            let lemma = stem(&lemma_file);
            let text = read_utf8(&lemma_file)?;
            builder.add_lemma_forms(&group, &lemma, text.lines())?;
        }
        tracing::debug!(group = %group, "loaded group");
    }

    let index = builder.build();
    tracing::info!(
        groups = index.groups().len(),
        forms = index.word_to_lemma().len(),
        root = %root.display(),
        "wordlists loaded"
    );
    Ok(index)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

fn sorted_entries(dir: &Path, kind: EntryKind) -> Result<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| LexiconError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if base_name(&path).starts_with('.') {
            continue;
        }
        let wanted = match kind {
            EntryKind::Dir => path.is_dir(),
            EntryKind::File => path.is_file(),
        };
        if wanted {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| LexiconError::Decode {
        path: path.to_path_buf(),
    })
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("concord-lexicon-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(path: PathBuf, content: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_tree() {
        let root = scratch_dir("tree");
        write(root.join("plante/floare.txt"), "floare\nflori\n\n  florile \n".as_bytes());
        write(root.join("plante/trandafir.txt"), "trandafir\ntrandafiri".as_bytes());
        write(root.join("culori/roz.txt"), "roz\ntrandafiri\n".as_bytes());
        write(root.join("plante/.hidden"), b"ignored");
        write(root.join("stray.txt"), b"not a group");
        fs::create_dir_all(root.join("goala")).unwrap();

        let index = load_groups(&root, DuplicatePolicy::LastWins).unwrap();
        let names: Vec<_> = index.groups().iter().map(|g| g.name()).collect();
        assert_eq!(names, ["culori", "goala", "plante"]);

        let plante = index.group("plante").unwrap();
        assert_eq!(plante.len(), 5);
        assert_eq!(plante.lemma("florile"), Some("floare"));
        assert!(!plante.contains("ignored"));

        // "plante" is read after "culori", so its lemma file wins the flat map.
        assert_eq!(index.lemma_of("trandafiri"), Some("trandafir"));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_reject_conflicts_from_disk() {
        let root = scratch_dir("reject");
        write(root.join("a/unu.txt"), b"forma\n");
        write(root.join("b/doi.txt"), b"forma\n");

        let err = load_groups(&root, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, LexiconError::ConflictingLemma { .. }));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_non_utf8_wordlist() {
        let root = scratch_dir("decode");
        write(root.join("g/rau.txt"), &[0x66, 0xff, 0xfe, 0x0a]);

        let err = load_groups(&root, DuplicatePolicy::LastWins).unwrap_err();
        assert!(matches!(err, LexiconError::Decode { .. }));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_missing_root() {
        let err = load_groups("/definitely/not/here", DuplicatePolicy::LastWins).unwrap_err();
        assert!(matches!(err, LexiconError::NotADirectory(_)));
    }
}
