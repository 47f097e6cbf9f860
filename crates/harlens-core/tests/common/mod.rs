pub mod har_server;
