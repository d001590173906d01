pub mod autocomplete_request;
pub mod autocomplete_response;
pub mod autocomplete_route;
