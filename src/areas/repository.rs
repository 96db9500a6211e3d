use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::ledger::Ledger;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::LitError;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository directory inside the working root
pub const REPOSITORY_DIR: &str = ".lit";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    ledger: Ledger,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let lit_path = path.join(REPOSITORY_DIR);

        let index = Index::new(lit_path.join("index").into_boxed_path());
        let database = Database::new(lit_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(lit_path.clone().into_boxed_path());
        let ledger = Ledger::new(lit_path.join("tracked").into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            ledger,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lit_path(&self) -> Box<Path> {
        self.path.join(REPOSITORY_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.lit_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(LitError::NotInitialized.into())
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Id and content of the active branch's tip
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let head = self.database.load(&head_oid)?;

        Ok((head_oid, head))
    }
}
