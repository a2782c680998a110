//! # LogiFlow Landing
//!
//! The marketing landing page of LogiFlow Pro: a generator that renders the
//! page from a content model, a minimal static server that serves it, and a
//! headless model of everything the page does when a visitor interacts
//! with it.
//!
//! # Architecture
//!
//! ```text
//! config.toml ─┐
//! content.toml ┴─► generate ──► dist/launch.html + assets/ ──► server (GET /, GET /<path>)
//!                     │
//!                     └─► page_layout ──► controller::Controller::mount
//! ```
//!
//! The generated page ships a small script that binds the interactions in
//! the browser. The [`controller`] binds the same interactions against the
//! page's [`controller::PageLayout`] without a browser, driven by explicit
//! events and a virtual clock, so every behaviour of the page is a unit test.
//! Both read their timings from the same config.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, stock defaults, merging, validation, CSS/JS generation |
//! | [`types`] | Content model of the page: features, tabs, screenshots, plans, benefits |
//! | [`generate`] | Renders the page with Maud, writes it and copies assets |
//! | [`server`] | Static asset server on axum, with graceful shutdown |
//! | [`mime`] | Extension → content type table |
//! | [`timer`] | Virtual-clock timer queue with cancellable handles |
//! | [`notification`] | The single-slot notification widget and its lifecycle |
//! | [`form`] | Account request form: validation, submission state machine, sink seam |
//! | [`controller`] | Per-surface interaction handlers composed at mount time |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Owned State, Explicit Timers
//!
//! Every piece of interactive state has exactly one owner: the notification
//! manager owns the notification slot, each toggle group owns its active
//! index, each gallery owns its pending image swap. Delayed work is scheduled
//! on a [`timer::TimerQueue`] and the handle is kept by the owner, so
//! dismissing a notification or clicking a newer thumbnail cancels the
//! stale timer instead of letting it fire into changed state.
//!
//! ## Submission Behind a Trait
//!
//! The account request endpoint is not part of this site. Validated drafts
//! go to a [`form::SubmissionSink`]; the stock [`form::SimulatedSubmission`]
//! logs the request body and succeeds.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error and all
//! interpolation is auto-escaped, which matters for `content.toml`.

pub mod config;
pub mod controller;
pub mod form;
pub mod generate;
pub mod mime;
pub mod notification;
pub mod output;
pub mod server;
pub mod timer;
pub mod types;
