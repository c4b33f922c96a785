//! File storage feature backed by Cloudflare R2.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/upload` | Upload a single file (multipart field `file`) |
//! | GET | `/lists` | List every file in the bucket |
//! | POST | `/public` | Generate a time-limited download URL |
//! | GET | `/file/{id}` | Get one file's metadata by key |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use handlers::FilesState;
pub use routes::routes;
pub use services::FileService;
