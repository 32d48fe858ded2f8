use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::{fs, sync::Mutex};

use crate::{
    error::{AppError, AppResult},
    models::{Contact, Movie},
};

/// Flat-file JSON persistence: one document per collection, read wholesale
/// on every request, rewritten wholesale on every mutation. Mutations are
/// serialized behind a single write lock so interleaved read-modify-write
/// cycles cannot drop each other's updates.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<Inner>,
}

struct Inner {
    movies_path: PathBuf,
    carousels_path: PathBuf,
    contacts_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub async fn open(data_dir: &Path) -> AppResult<Self> {
        let inner = Inner {
            movies_path: data_dir.join("movies.json"),
            carousels_path: data_dir.join("carousels.json"),
            contacts_path: data_dir.join("contacts.json"),
            write_lock: Mutex::new(()),
        };

        if !fs::try_exists(&inner.contacts_path).await? {
            write_document(&inner.contacts_path, &Vec::<Contact>::new()).await?;
        }

        Ok(Self { inner: Arc::new(inner) })
    }

    pub async fn load_movies(&self) -> AppResult<Vec<Movie>> {
        read_document(&self.inner.movies_path).await
    }

    /// The carousels document is curated site content; it is served verbatim.
    pub async fn load_carousels(&self) -> AppResult<Value> {
        read_document(&self.inner.carousels_path).await
    }

    pub async fn load_contacts(&self) -> AppResult<Vec<Contact>> {
        read_document(&self.inner.contacts_path).await
    }

    /// Read-modify-write on a single movie, located by linear scan. The
    /// whole catalog document is rewritten under the write lock; the updated
    /// record is returned. Nothing is written when the id is unknown or the
    /// mutation fails.
    pub async fn update_movie<F>(&self, id: u32, mutate: F) -> AppResult<Movie>
    where
        F: FnOnce(&mut Movie) -> AppResult<()>,
    {
        let _guard = self.inner.write_lock.lock().await;

        let mut movies: Vec<Movie> = read_document(&self.inner.movies_path).await?;
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::NotFound(format!("movie {id} not found")))?;

        mutate(movie)?;
        let updated = movie.clone();

        write_document(&self.inner.movies_path, &movies).await?;
        Ok(updated)
    }

    pub async fn append_contact(&self, contact: Contact) -> AppResult<Contact> {
        let _guard = self.inner.write_lock.lock().await;

        let mut contacts: Vec<Contact> = read_document(&self.inner.contacts_path).await?;
        contacts.push(contact.clone());

        write_document(&self.inner.contacts_path, &contacts).await?;
        Ok(contact)
    }
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes =
        fs::read(path).await.with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(value)
}

/// Serialize to a sibling temp file and rename it over the target, so an
/// interrupted write never leaves a half-written document behind.
async fn write_document<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let json = serde_json::to_vec_pretty(value).context("serializing document")?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &json).await.with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).await.with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
