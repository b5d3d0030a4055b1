//! Test harness running the feed service over either backend, seeded with the
//! demo fixture, with hooks to inspect what each backend actually stored.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gf_core::{Backend, FeedService, Mode, Notice, Notifier, Post, SessionIdentity, User};
use gf_storage_local::LocalBlobStore;
use gf_store_demo::{fixtures, DemoBlobStore, DemoPostStore};
use gf_store_document::{
    post_from_document, post_to_document, DocumentPostStore, MemoryDocumentStore,
    POSTS_COLLECTION,
};
use tempfile::TempDir;

const MEDIA_URL_PREFIX: &str = "/media";

/// Keeps every notice for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).push(notice);
    }
}

enum Stores {
    Demo {
        posts: DemoPostStore,
        blobs: DemoBlobStore,
    },
    Live {
        docs: MemoryDocumentStore,
        media_root: PathBuf,
        _media_dir: TempDir,
    },
}

pub struct Harness {
    pub feed: FeedService,
    pub session: Arc<SessionIdentity>,
    pub notices: Arc<RecordingNotifier>,
    stores: Stores,
}

pub fn gamer(id: &str, username: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        profile_image: format!("https://img.example/{username}.png"),
    }
}

impl Harness {
    pub fn demo() -> Self {
        let posts = DemoPostStore::seeded();
        let blobs = DemoBlobStore::new();
        let backend = Backend::new(Mode::Demo, Arc::new(posts.clone()), Arc::new(blobs.clone()));
        Self::assemble(backend, Stores::Demo { posts, blobs })
    }

    pub fn live() -> Self {
        let docs = MemoryDocumentStore::new();
        let seeded = fixtures::demo_posts()
            .iter()
            .map(post_to_document)
            .collect::<Result<Vec<_>, _>>()
            .expect("fixture posts serialize");
        docs.load(POSTS_COLLECTION, seeded);

        let media_dir = tempfile::tempdir().expect("temp media dir");
        let media_root = media_dir.path().to_path_buf();
        let blobs = LocalBlobStore::new(media_root.clone(), MEDIA_URL_PREFIX.to_string());
        let backend = Backend::new(
            Mode::Live,
            Arc::new(DocumentPostStore::new(docs.clone())),
            Arc::new(blobs),
        );

        Self::assemble(
            backend,
            Stores::Live {
                docs,
                media_root,
                _media_dir: media_dir,
            },
        )
    }

    fn assemble(backend: Backend, stores: Stores) -> Self {
        let session = Arc::new(SessionIdentity::anonymous());
        let notices = Arc::new(RecordingNotifier::default());
        let feed = FeedService::new(backend, session.clone(), notices.clone());
        Self {
            feed,
            session,
            notices,
            stores,
        }
    }

    pub fn sign_in(&self, id: &str, username: &str) -> User {
        let user = gamer(id, username);
        self.session.sign_in(user.clone());
        user
    }

    /// Every stored post, regardless of page size.
    pub async fn all_posts(&self) -> Vec<Post> {
        match &self.stores {
            Stores::Demo { posts, .. } => posts.snapshot().await,
            Stores::Live { docs, .. } => docs
                .snapshot(POSTS_COLLECTION)
                .into_iter()
                .map(|doc| post_from_document(doc).expect("stored post parses"))
                .collect(),
        }
    }

    pub async fn post(&self, id: &str) -> Post {
        self.all_posts()
            .await
            .into_iter()
            .find(|p| p.id == id)
            .unwrap_or_else(|| panic!("post {id} is stored"))
    }

    /// The bytes behind a media URL the backend handed out.
    pub fn read_media(&self, url: &str) -> Option<Vec<u8>> {
        match &self.stores {
            Stores::Demo { blobs, .. } => blobs.get(url).map(|b| b.to_vec()),
            Stores::Live { media_root, .. } => {
                let rel = url.strip_prefix(MEDIA_URL_PREFIX)?.trim_start_matches('/');
                std::fs::read(media_root.join(rel)).ok()
            }
        }
    }
}
