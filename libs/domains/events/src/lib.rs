//! Events Domain
//!
//! Review workflow for operational events. Every event starts `PENDING`;
//! reviewing it derives a management status from its type, and unreviewing
//! a reviewed event puts it back to `PENDING`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Event Flow                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  HTTP /api/events ──► handlers ──► EventService               │
//! │                                      │                        │
//! │                                      ├─► classification       │
//! │                                      │   (type ► management)  │
//! │                                      │                        │
//! │                                      └─► EventRepository      │
//! │                                            ├─► MongoDB        │
//! │                                            └─► in-memory      │
//! │                                                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```text
//!   PENDING ──review──► REVIEWED (management status set)
//!      ▲                   │
//!      └─────unreview──────┘ (management status cleared)
//! ```

pub mod classification;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod seed;
pub mod service;

pub use classification::{classify_for_management, is_valid_type, parse_event_type};
pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateEvent, Event, EventQuery, EventResponse, EventStatus, EventType, ManagementStatus,
    MessageResponse, UpdateEvent,
};
pub use crate::mongodb::MongoEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
