// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role-gated demo resources.
//!
//! These handlers exist to exercise the authorization gate; the interesting
//! behavior is in the allow-lists declared at route registration, not here.

use axum::Json;

use crate::response::StatusResponse;

/// GET /api/v1/products/list
///
/// Allow-list: Admin, Supervisor.
pub async fn list_products() -> Json<StatusResponse> {
    Json(StatusResponse::success())
}

/// DELETE /api/v1/products/delete
///
/// Allow-list: Admin only.
pub async fn delete_product() -> Json<StatusResponse> {
    Json(StatusResponse::success())
}

/// GET /api/v1/protected
///
/// Any authenticated identity, no role restriction.
pub async fn protected_probe() -> Json<StatusResponse> {
    Json(StatusResponse::success())
}
