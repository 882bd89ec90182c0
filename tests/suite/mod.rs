mod backend_http;
mod config_file;
mod filter_flow;
mod profile_edit;
