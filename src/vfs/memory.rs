//! In-memory backend with per-path fault injection.

use super::{DestFile, Filesystem, SourceFile, Walk, WalkEntry};
use std::collections::{BTreeMap, HashSet};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An operation that [`MemoryFs`] can be told to fail on a given path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    /// The walk yields an error instead of this entry
    Walk,
    /// `open` fails
    Open,
    /// Reads from an opened handle fail
    Read,
    /// Seeking an opened handle fails
    Seek,
    /// `create_dir_all` fails for this directory
    CreateDir,
    /// `create` fails
    Create,
    /// Writes to a created handle fail
    Write,
    /// Writes fail with "no space left on device"
    StorageFull,
    /// `sync_all` fails
    Sync,
    /// `close` fails
    Close,
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    faults: HashSet<(PathBuf, Fault)>,
    closed: Vec<PathBuf>,
}

impl State {
    fn has_fault(&self, path: &Path, fault: Fault) -> bool {
        self.faults.contains(&(path.to_path_buf(), fault))
    }

    fn insert_dirs(&mut self, path: &Path) {
        for dir in path.ancestors() {
            if dir.as_os_str().is_empty() {
                continue;
            }
            self.nodes.entry(dir.to_path_buf()).or_insert(Node::Dir);
        }
    }
}

fn injected(path: &Path, fault: Fault) -> io::Error {
    let kind = match fault {
        Fault::StorageFull => io::ErrorKind::StorageFull,
        _ => io::ErrorKind::Other,
    };
    let msg = format!("injected {fault:?} fault at {}", path.display());
    io::Error::new(kind, msg)
}

/// A filesystem held entirely in memory.
///
/// Paths are compared verbatim, so callers should use absolute paths
/// throughout. Clones share the same tree.
///
/// # Example
///
/// ```
/// use dedupcopy::vfs::{Filesystem, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.write_file("/src/a.txt", "apple");
/// assert_eq!(fs.read_file("/src/a.txt").as_deref(), Some(&b"apple"[..]));
/// assert!(fs.walk(Path::new("/src")).count() >= 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<State>>,
}

impl MemoryFs {
    /// Create an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write a file, creating its parent directories.
    pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(&self, path: P, contents: C) {
        let path = path.as_ref();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            state.insert_dirs(parent);
        }
        state
            .nodes
            .insert(path.to_path_buf(), Node::File(contents.as_ref().to_vec()));
    }

    /// Create a directory and its parents.
    pub fn mkdir<P: AsRef<Path>>(&self, path: P) {
        self.lock().insert_dirs(path.as_ref());
    }

    /// Contents of a file, or `None` if it does not exist or is a directory.
    #[must_use]
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Option<Vec<u8>> {
        match self.lock().nodes.get(path.as_ref()) {
            Some(Node::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    /// All files under `root`, in walk order.
    #[must_use]
    pub fn files_under<P: AsRef<Path>>(&self, root: P) -> Vec<(PathBuf, Vec<u8>)> {
        let root = root.as_ref();
        self.lock()
            .nodes
            .iter()
            .filter(|(path, _)| path.starts_with(root))
            .filter_map(|(path, node)| match node {
                Node::File(contents) => Some((path.clone(), contents.clone())),
                Node::Dir => None,
            })
            .collect()
    }

    /// Make `fault` happen whenever the matching operation touches `path`.
    pub fn inject<P: AsRef<Path>>(&self, path: P, fault: Fault) {
        self.lock()
            .faults
            .insert((path.as_ref().to_path_buf(), fault));
    }

    /// Destination files whose handles were released, in release order.
    #[must_use]
    pub fn closed_files(&self) -> Vec<PathBuf> {
        self.lock().closed.clone()
    }
}

impl Filesystem for MemoryFs {
    fn walk(&self, root: &Path) -> Walk<'_> {
        let state = self.lock();
        if !state.nodes.contains_key(root) {
            let err = io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such file or directory", root.display()),
            );
            return Box::new(std::iter::once(Err(err)));
        }

        let entries: Vec<io::Result<WalkEntry>> = state
            .nodes
            .range(root.to_path_buf()..)
            .take_while(|(path, _)| path.starts_with(root))
            .map(|(path, node)| {
                if state.has_fault(path, Fault::Walk) {
                    return Err(injected(path, Fault::Walk));
                }
                Ok(match node {
                    Node::Dir => WalkEntry {
                        path: path.clone(),
                        is_dir: true,
                        len: 0,
                    },
                    Node::File(contents) => WalkEntry {
                        path: path.clone(),
                        is_dir: false,
                        len: contents.len() as u64,
                    },
                })
            })
            .collect();
        Box::new(entries.into_iter())
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn SourceFile>> {
        let state = self.lock();
        if state.has_fault(path, Fault::Open) {
            return Err(injected(path, Fault::Open));
        }
        match state.nodes.get(path) {
            Some(Node::File(contents)) => Ok(Box::new(MemSourceFile {
                path: path.to_path_buf(),
                cursor: Cursor::new(contents.clone()),
                fail_read: state.has_fault(path, Fault::Read),
                fail_seek: state.has_fault(path, Fault::Seek),
            })),
            Some(Node::Dir) => Err(io::Error::other(format!(
                "{} is a directory",
                path.display()
            ))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such file", path.display()),
            )),
        }
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn DestFile>> {
        let mut state = self.lock();
        if state.has_fault(path, Fault::Create) {
            return Err(injected(path, Fault::Create));
        }
        let parent_is_dir = path
            .parent()
            .is_some_and(|parent| matches!(state.nodes.get(parent), Some(Node::Dir)));
        if !parent_is_dir {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory of {} does not exist", path.display()),
            ));
        }
        if matches!(state.nodes.get(path), Some(Node::Dir)) {
            return Err(io::Error::other(format!("{} is a directory", path.display())));
        }
        state.nodes.insert(path.to_path_buf(), Node::File(Vec::new()));
        Ok(Box::new(MemDestFile {
            state: Arc::clone(&self.state),
            path: path.to_path_buf(),
        }))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if state.has_fault(path, Fault::CreateDir) {
            return Err(injected(path, Fault::CreateDir));
        }
        if let Some(blocker) = path
            .ancestors()
            .find(|dir| matches!(state.nodes.get(*dir), Some(Node::File(_))))
        {
            return Err(io::Error::other(format!(
                "{} exists and is not a directory",
                blocker.display()
            )));
        }
        state.insert_dirs(path);
        Ok(())
    }
}

struct MemSourceFile {
    path: PathBuf,
    cursor: Cursor<Vec<u8>>,
    fail_read: bool,
    fail_seek: bool,
}

impl Read for MemSourceFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_read {
            return Err(injected(&self.path, Fault::Read));
        }
        self.cursor.read(buf)
    }
}

impl Seek for MemSourceFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if self.fail_seek {
            return Err(injected(&self.path, Fault::Seek));
        }
        self.cursor.seek(pos)
    }
}

struct MemDestFile {
    state: Arc<Mutex<State>>,
    path: PathBuf,
}

impl MemDestFile {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for MemDestFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        for fault in [Fault::Write, Fault::StorageFull] {
            if state.has_fault(&self.path, fault) {
                return Err(injected(&self.path, fault));
            }
        }
        match state.nodes.get_mut(&self.path) {
            Some(Node::File(contents)) => {
                contents.extend_from_slice(buf);
                Ok(buf.len())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} was removed while open", self.path.display()),
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl DestFile for MemDestFile {
    fn sync_all(&mut self) -> io::Result<()> {
        if self.lock().has_fault(&self.path, Fault::Sync) {
            return Err(injected(&self.path, Fault::Sync));
        }
        Ok(())
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        let mut state = self.lock();
        state.closed.push(self.path.clone());
        if state.has_fault(&self.path, Fault::Close) {
            return Err(injected(&self.path, Fault::Close));
        }
        Ok(())
    }
}
