use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::{ApiClient, ApiError};
use crate::autosave::SaveTicket;
use crate::editor::ImageSelection;
use crate::post::{Draft, PostId};

use super::model::RequestId;
use super::update::Message;

/// A side effect requested by `update`.
///
/// `update` never touches the network or the filesystem; it queues these
/// on the model and the event loop hands them to a [`Dispatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListPosts(RequestId),
    GetPost(RequestId, PostId),
    LoadForEdit(RequestId, PostId),
    /// Read size and type of a file the user picked as cover image.
    InspectImage { session: RequestId, path: PathBuf },
    UploadImage {
        session: RequestId,
        image: ImageSelection,
    },
    SaveDraft { session: RequestId, draft: Draft },
    Publish { session: RequestId, draft: Draft },
    Delete(PostId),
    AutoSave {
        session: RequestId,
        ticket: SaveTicket<Draft>,
    },
}

/// Executes requests and reports their outcome as a [`Message`].
pub trait Dispatcher {
    fn dispatch(&self, request: Request);
}

/// Runs requests against the blog service on a tokio runtime.
pub struct ApiDispatcher {
    runtime: Handle,
    client: Arc<ApiClient>,
    results: UnboundedSender<Message>,
}

impl ApiDispatcher {
    pub fn new(runtime: Handle, client: ApiClient, results: UnboundedSender<Message>) -> Self {
        Self {
            runtime,
            client: Arc::new(client),
            results,
        }
    }
}

impl Dispatcher for ApiDispatcher {
    fn dispatch(&self, request: Request) {
        let client = Arc::clone(&self.client);
        let results = self.results.clone();
        self.runtime.spawn(async move {
            let msg = execute(&client, request).await;
            if results.send(msg).is_err() {
                tracing::debug!("event loop gone; dropping result");
            }
        });
    }
}

async fn execute(client: &ApiClient, request: Request) -> Message {
    match request {
        Request::ListPosts(request) => Message::PostsLoaded {
            request,
            result: client.list_posts().await,
        },
        Request::GetPost(request, id) => Message::PostLoaded {
            request,
            result: client.get_post(id).await,
        },
        Request::LoadForEdit(request, id) => Message::EditorPostLoaded {
            request,
            result: client.get_post(id).await,
        },
        Request::InspectImage { session, path } => {
            let result = inspect_image(path).await;
            Message::ImageInspected { session, result }
        }
        Request::UploadImage { session, image } => {
            let result = match tokio::fs::read(&image.path).await {
                Ok(bytes) => {
                    client
                        .upload_image(&image.file_name, &image.mime, bytes)
                        .await
                }
                Err(err) => Err(io_error(&image.path, &err)),
            };
            Message::ImageUploaded { session, result }
        }
        Request::SaveDraft { session, draft } => Message::DraftSaved {
            session,
            result: client.save_draft(&draft).await,
        },
        Request::Publish { session, draft } => Message::Published {
            session,
            result: client.publish(&draft).await,
        },
        Request::Delete(id) => Message::Deleted {
            id,
            result: client.delete_post(id).await,
        },
        Request::AutoSave { session, ticket } => {
            let result = client.save_draft(ticket.snapshot()).await;
            Message::AutoSaveFinished {
                session,
                ticket,
                result,
            }
        }
    }
}

async fn inspect_image(path: PathBuf) -> Result<ImageSelection, ApiError> {
    let lookup = path.clone();
    match tokio::task::spawn_blocking(move || ImageSelection::from_path(&lookup)).await {
        Ok(Ok(selection)) => Ok(selection),
        Ok(Err(err)) => Err(io_error(&path, &err)),
        Err(join) => Err(ApiError::Io {
            path: path.display().to_string(),
            message: join.to_string(),
        }),
    }
}

fn io_error(path: &std::path::Path, err: &std::io::Error) -> ApiError {
    ApiError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
