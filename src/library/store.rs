//! Book library persistence.
//!
//! Two JSON files under the library root:
//!
//! * `library.json` — the metadata index, newest book first.
//! * `progress.json` — current page number keyed by book id.
//!
//! Book files themselves are copied into `books/<id>` on add, so the
//! library owns its content and the original file can move or vanish.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// BookMetadata
// ---------------------------------------------------------------------------

/// Index record for one book in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub id: String,
    /// Source file name without its extension.
    pub title: String,
    /// Milliseconds since the Unix epoch at add time.
    pub added_at: u64,
    /// Size of the book file in bytes.
    pub size: u64,
}

// ---------------------------------------------------------------------------
// LibraryError
// ---------------------------------------------------------------------------

/// Errors from library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("library I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("library index is corrupt: {0}")]
    Index(#[from] serde_json::Error),

    #[error("no book with id {0}")]
    UnknownBook(String),
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// File-backed book library rooted at one directory.
///
/// ```rust,no_run
/// use shadow_reader::library::Library;
///
/// let library = Library::open("/tmp/shadow-reader-library").unwrap();
/// let book = library.add_book("mybook.txt".as_ref()).unwrap();
/// library.save_progress(&book.id, 3).unwrap();
/// assert_eq!(library.load_progress(&book.id).unwrap(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Open (and create if needed) a library at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let root = root.into();
        std::fs::create_dir_all(root.join("books"))?;
        Ok(Self { root })
    }

    fn index_file(&self) -> PathBuf {
        self.root.join("library.json")
    }

    fn progress_file(&self) -> PathBuf {
        self.root.join("progress.json")
    }

    /// Where the stored copy of a book's content lives.
    pub fn book_path(&self, id: &str) -> PathBuf {
        self.root.join("books").join(id)
    }

    // -----------------------------------------------------------------------
    // Index operations
    // -----------------------------------------------------------------------

    /// All books, newest first.  A missing index means an empty library.
    pub fn books(&self) -> Result<Vec<BookMetadata>, LibraryError> {
        read_json(&self.index_file())
    }

    /// Look up one book by id.
    pub fn book(&self, id: &str) -> Result<BookMetadata, LibraryError> {
        self.books()?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| LibraryError::UnknownBook(id.to_string()))
    }

    /// Add a book: copy `source` into the library and prepend its metadata
    /// to the index.
    pub fn add_book(&self, source: &Path) -> Result<BookMetadata, LibraryError> {
        let size = std::fs::metadata(source)?.len();
        let title = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());

        let metadata = BookMetadata {
            id: Uuid::new_v4().to_string(),
            title,
            added_at: unix_millis(),
            size,
        };

        std::fs::copy(source, self.book_path(&metadata.id))?;

        let mut index = self.books()?;
        index.insert(0, metadata.clone());
        write_json(&self.index_file(), &index)?;

        log::info!(
            "library: added \"{}\" ({} bytes) as {}",
            metadata.title,
            metadata.size,
            metadata.id
        );
        Ok(metadata)
    }

    /// Remove a book, its stored content, and its reading progress.
    pub fn delete_book(&self, id: &str) -> Result<(), LibraryError> {
        let mut index = self.books()?;
        let before = index.len();
        index.retain(|b| b.id != id);
        if index.len() == before {
            return Err(LibraryError::UnknownBook(id.to_string()));
        }
        write_json(&self.index_file(), &index)?;

        // Content file may already be gone; that is not an error.
        match std::fs::remove_file(self.book_path(id)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut progress: HashMap<String, usize> = read_json(&self.progress_file())?;
        if progress.remove(id).is_some() {
            write_json(&self.progress_file(), &progress)?;
        }

        log::info!("library: deleted book {id}");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reading progress
    // -----------------------------------------------------------------------

    /// Persist the current page number (1-based) for a book.
    pub fn save_progress(&self, id: &str, page: usize) -> Result<(), LibraryError> {
        let mut progress: HashMap<String, usize> = read_json(&self.progress_file())?;
        progress.insert(id.to_string(), page);
        write_json(&self.progress_file(), &progress)
    }

    /// Saved page number for a book; `1` when none was ever saved.
    pub fn load_progress(&self, id: &str) -> Result<usize, LibraryError> {
        let progress: HashMap<String, usize> = read_json(&self.progress_file())?;
        Ok(progress.get(id).copied().unwrap_or(1))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Read a JSON file, treating a missing file as the type's default.
fn read_json<T>(path: &Path) -> Result<T, LibraryError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), LibraryError> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn make_library() -> (tempfile::TempDir, Library) {
        let dir = tempdir().expect("temp dir");
        let library = Library::open(dir.path().join("library")).expect("open");
        (dir, library)
    }

    fn make_book_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).expect("create");
        write!(file, "{content}").expect("write");
        path
    }

    #[test]
    fn empty_library_has_no_books() {
        let (_dir, library) = make_library();
        assert!(library.books().unwrap().is_empty());
    }

    #[test]
    fn add_book_records_metadata_and_copies_content() {
        let (dir, library) = make_library();
        let source = make_book_file(dir.path(), "les-mis.txt", "To love or have loved");

        let book = library.add_book(&source).expect("add");

        assert_eq!(book.title, "les-mis");
        assert_eq!(book.size, 21);
        assert!(book.added_at > 0);

        let stored = std::fs::read_to_string(library.book_path(&book.id)).expect("stored copy");
        assert_eq!(stored, "To love or have loved");

        let books = library.books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0], book);
    }

    #[test]
    fn newest_book_is_listed_first() {
        let (dir, library) = make_library();
        let a = make_book_file(dir.path(), "a.txt", "first");
        let b = make_book_file(dir.path(), "b.txt", "second");

        library.add_book(&a).unwrap();
        let second = library.add_book(&b).unwrap();

        let books = library.books().unwrap();
        assert_eq!(books[0].id, second.id);
    }

    #[test]
    fn delete_book_removes_metadata_content_and_progress() {
        let (dir, library) = make_library();
        let source = make_book_file(dir.path(), "gone.txt", "soon deleted");
        let book = library.add_book(&source).unwrap();
        library.save_progress(&book.id, 7).unwrap();

        library.delete_book(&book.id).expect("delete");

        assert!(library.books().unwrap().is_empty());
        assert!(!library.book_path(&book.id).exists());
        // Progress falls back to page 1 once the record is gone.
        assert_eq!(library.load_progress(&book.id).unwrap(), 1);
    }

    #[test]
    fn delete_unknown_book_errors() {
        let (_dir, library) = make_library();
        let err = library.delete_book("no-such-id").unwrap_err();
        assert!(matches!(err, LibraryError::UnknownBook(_)));
    }

    #[test]
    fn progress_round_trips_per_book() {
        let (dir, library) = make_library();
        let a = library
            .add_book(&make_book_file(dir.path(), "a.txt", "aaa"))
            .unwrap();
        let b = library
            .add_book(&make_book_file(dir.path(), "b.txt", "bbb"))
            .unwrap();

        library.save_progress(&a.id, 12).unwrap();
        library.save_progress(&b.id, 3).unwrap();

        assert_eq!(library.load_progress(&a.id).unwrap(), 12);
        assert_eq!(library.load_progress(&b.id).unwrap(), 3);
    }

    #[test]
    fn progress_defaults_to_page_one() {
        let (_dir, library) = make_library();
        assert_eq!(library.load_progress("unknown").unwrap(), 1);
    }

    #[test]
    fn book_lookup_by_id() {
        let (dir, library) = make_library();
        let book = library
            .add_book(&make_book_file(dir.path(), "find-me.txt", "x"))
            .unwrap();

        assert_eq!(library.book(&book.id).unwrap().title, "find-me");
        assert!(matches!(
            library.book("missing"),
            Err(LibraryError::UnknownBook(_))
        ));
    }

    #[test]
    fn ids_are_unique() {
        let (dir, library) = make_library();
        let source = make_book_file(dir.path(), "same.txt", "same content");
        let first = library.add_book(&source).unwrap();
        let second = library.add_book(&source).unwrap();
        assert_ne!(first.id, second.id);
    }
}
