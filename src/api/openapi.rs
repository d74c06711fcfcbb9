//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, items, loans, patrons};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BAT API",
        version = "1.0.0",
        description = "Borrowing Administration Tool REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        // Patrons
        patrons::list_patrons,
        patrons::get_patron,
        patrons::create_patron,
        patrons::pay_fee,
        patrons::makerspace_access,
        // Loans
        loans::get_patron_loans,
        loans::check_borrow,
        loans::borrow_item,
        loans::check_return,
        loans::return_item,
    ),
    components(
        schemas(
            // Catalog
            crate::models::item::Item,
            crate::models::item::CreateItem,
            crate::models::enums::ItemCategory,
            // Patrons
            crate::models::patron::PatronShort,
            crate::models::patron::PatronDetails,
            crate::models::patron::CreatePatron,
            crate::models::patron::FeePayment,
            crate::models::patron::FeePaymentReceipt,
            crate::models::enums::PatronCategory,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            loans::LoanRequest,
            crate::services::lifecycle::ReturnOutcome,
            super::EligibilityResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Catalog item management"),
        (name = "patrons", description = "Patron registration, fees and makerspace access"),
        (name = "loans", description = "Borrowing and returning")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
