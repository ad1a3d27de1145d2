//! In-memory collaborator fakes for pipeline tests.

use async_trait::async_trait;
use brandhub_core::catalog::AssetCatalog;
use brandhub_core::models::{GymRecord, NewGymElement, NewGymLogo};
use brandhub_core::AppError;
use brandhub_services::{CaptionContext, CaptionSuggestion, Captioner};
use brandhub_storage::{Storage, StorageError, StorageResult};
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub const OASIS_ID: Uuid = Uuid::from_u128(0x11111111_1111_1111_1111_111111111111);
pub const IRONWORKS_ID: Uuid = Uuid::from_u128(0x22222222_2222_2222_2222_222222222222);

pub fn registry() -> Vec<GymRecord> {
    vec![
        GymRecord {
            id: OASIS_ID,
            code: "OASIS".to_string(),
            name: "Oasis Fitness".to_string(),
        },
        GymRecord {
            id: IRONWORKS_ID,
            code: "IRONWORKS".to_string(),
            name: "Ironworks Gym".to_string(),
        },
    ]
}

/// In-memory storage backend. Optionally fails the nth `put` call
/// (1-based) to exercise partial-batch behavior.
pub struct MemoryStorage {
    pub objects: Mutex<HashMap<String, Bytes>>,
    puts: AtomicUsize,
    fail_on_put: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            puts: AtomicUsize::new(0),
            fail_on_put: None,
        }
    }

    pub fn failing_on_put(n: usize) -> Self {
        Self {
            fail_on_put: Some(n),
            ..Self::new()
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(&self, key: &str, _content_type: &str, data: Bytes) -> StorageResult<String> {
        let call = self.puts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_put == Some(call) {
            return Err(StorageError::UploadFailed(
                "injected storage failure".to_string(),
            ));
        }
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(format!("http://assets.test/{}", key))
    }

    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|b| b.to_vec())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }
}

/// In-memory asset catalog. Optionally fails every insert.
pub struct MemoryCatalog {
    pub logos: Mutex<Vec<NewGymLogo>>,
    pub elements: Mutex<Vec<NewGymElement>>,
    fail_inserts: bool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            logos: Mutex::new(Vec::new()),
            elements: Mutex::new(Vec::new()),
            fail_inserts: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Self::new()
        }
    }

    pub fn logo_count(&self) -> usize {
        self.logos.lock().unwrap().len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.lock().unwrap().len()
    }
}

#[async_trait]
impl AssetCatalog for MemoryCatalog {
    async fn insert_logo(&self, logo: NewGymLogo) -> Result<Uuid, AppError> {
        if self.fail_inserts {
            return Err(AppError::Internal("injected insert failure".to_string()));
        }
        self.logos.lock().unwrap().push(logo);
        Ok(Uuid::new_v4())
    }

    async fn insert_element(&self, element: NewGymElement) -> Result<Uuid, AppError> {
        if self.fail_inserts {
            return Err(AppError::Internal("injected insert failure".to_string()));
        }
        self.elements.lock().unwrap().push(element);
        Ok(Uuid::new_v4())
    }

    async fn list_logo_filenames(&self, gym_id: Option<Uuid>) -> Result<Vec<String>, AppError> {
        Ok(self
            .logos
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.gym_id == gym_id)
            .map(|l| l.filename.clone())
            .collect())
    }
}

/// Captioner fed a script of responses, one per call; `None` entries and
/// an exhausted script both fail the call.
pub struct ScriptedCaptioner {
    responses: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedCaptioner {
    pub fn new(responses: Vec<Option<&str>>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(|s| s.to_string()))
                    .collect(),
            ),
        }
    }

    pub fn always(name: &str) -> Self {
        Self::new(vec![Some(name); 16])
    }

    pub fn failing() -> Self {
        Self::new(vec![])
    }
}

#[async_trait]
impl Captioner for ScriptedCaptioner {
    async fn suggest_filename(
        &self,
        _image: Bytes,
        _context: &CaptionContext,
    ) -> anyhow::Result<CaptionSuggestion> {
        match self.responses.lock().unwrap().pop_front() {
            Some(Some(name)) => Ok(CaptionSuggestion {
                suggested_name: name,
                analysis: serde_json::json!({"source": "scripted"}),
            }),
            _ => Err(anyhow::anyhow!("caption service unavailable")),
        }
    }
}

/// Shorthand for building an incoming file.
pub fn incoming(name: &str, content_type: &str) -> brandhub_services::IncomingFile {
    brandhub_services::IncomingFile {
        name: name.to_string(),
        content_type: content_type.to_string(),
        data: Bytes::from_static(b"file-bytes"),
    }
}
