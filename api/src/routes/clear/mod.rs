pub mod clear_all_route;
pub mod clear_chat_route;
pub mod clear_response;
