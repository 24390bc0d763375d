use crate::entry::WalkEntry;
use crate::error::WalkError;
use logging::trace_walk;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{self, PathBuf};

/// Depth-first iterator over filesystem entries.
#[derive(Debug)]
pub struct Walker {
    follow_symlinks: bool,
    root_entry: Option<WalkEntry>,
    stack: Vec<DirectoryState>,
    visited: HashSet<PathBuf>,
    finished: bool,
}

impl Walker {
    pub(crate) fn new(
        root: PathBuf,
        follow_symlinks: bool,
        include_root: bool,
    ) -> Result<Self, WalkError> {
        let root = path::absolute(&root).map_err(|error| WalkError::root_metadata(root, error))?;
        trace_walk!("walking {}", root.display());

        let link_metadata = fs::symlink_metadata(&root)
            .map_err(|error| WalkError::root_metadata(root.clone(), error))?;
        let is_symlink = link_metadata.file_type().is_symlink();
        let metadata = if is_symlink && follow_symlinks {
            fs::metadata(&root).map_err(|error| WalkError::metadata(root.clone(), error))?
        } else {
            link_metadata
        };
        let descend = metadata.is_dir();

        let mut walker = Self {
            follow_symlinks,
            root_entry: None,
            stack: Vec::new(),
            visited: HashSet::new(),
            finished: false,
        };

        if descend {
            walker.push_directory(root.clone(), PathBuf::new(), 0)?;
        }

        if include_root {
            walker.root_entry = Some(WalkEntry {
                full_path: root,
                relative_path: PathBuf::new(),
                metadata,
                depth: 0,
                is_root: true,
                is_symlink,
            });
        }

        Ok(walker)
    }

    fn push_directory(
        &mut self,
        fs_path: PathBuf,
        relative_prefix: PathBuf,
        depth: usize,
    ) -> Result<(), WalkError> {
        let canonical = fs::canonicalize(&fs_path)
            .map_err(|error| WalkError::canonicalize(fs_path.clone(), error))?;
        if !self.visited.insert(canonical) {
            trace_walk!("skipping already visited directory {}", fs_path.display());
            return Ok(());
        }

        let state = DirectoryState::new(fs_path, relative_prefix, depth)?;
        trace_walk!(
            "entering {} ({} entries)",
            state.fs_path.display(),
            state.entries.len()
        );
        self.stack.push(state);
        Ok(())
    }

    fn prepare_entry(
        &mut self,
        full_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<WalkEntry, WalkError> {
        let link_metadata = fs::symlink_metadata(&full_path)
            .map_err(|error| WalkError::metadata(full_path.clone(), error))?;
        let is_symlink = link_metadata.file_type().is_symlink();

        let metadata = if is_symlink && self.follow_symlinks {
            fs::metadata(&full_path).map_err(|error| WalkError::metadata(full_path.clone(), error))?
        } else {
            link_metadata
        };

        if metadata.is_dir() {
            self.push_directory(full_path.clone(), relative_path.clone(), depth)?;
        }

        Ok(WalkEntry {
            full_path,
            relative_path,
            metadata,
            depth,
            is_root: false,
            is_symlink,
        })
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some(entry) = self.root_entry.take() {
            return Some(Ok(entry));
        }

        loop {
            let (full_path, relative_path, depth) = {
                let state = self.stack.last_mut()?;

                if let Some(name) = state.next_name() {
                    let full_path = state.fs_path.join(&name);
                    let relative_path = state.relative_prefix.join(&name);
                    (full_path, relative_path, state.depth + 1)
                } else {
                    self.stack.pop();
                    continue;
                }
            };

            match self.prepare_entry(full_path, relative_path, depth) {
                Ok(entry) => return Some(Ok(entry)),
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    relative_prefix: PathBuf,
    entries: Vec<OsString>,
    index: usize,
    depth: usize,
}

impl DirectoryState {
    fn new(fs_path: PathBuf, relative_prefix: PathBuf, depth: usize) -> Result<Self, WalkError> {
        let mut entries = Vec::new();
        let read_dir =
            fs::read_dir(&fs_path).map_err(|error| WalkError::read_dir(fs_path.clone(), error))?;
        for entry in read_dir {
            let entry = entry.map_err(|error| WalkError::read_dir_entry(fs_path.clone(), error))?;
            entries.push(entry.file_name());
        }
        entries.sort();

        Ok(Self {
            fs_path,
            relative_prefix,
            entries,
            index: 0,
            depth,
        })
    }

    fn next_name(&mut self) -> Option<OsString> {
        let name = self.entries.get(self.index).cloned();
        if name.is_some() {
            self.index += 1;
        }
        name
    }
}
