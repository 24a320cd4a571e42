pub mod user;
pub mod verification_code;

/*
 A user account is created by registration and never hard-deleted.
 Access is gated per-route by three flags on the account itself:
 enabled (base access), team, and superuser. Email ownership is proven
 with a one-time code; password resets reuse the same code machinery
 under a separate purpose namespace.
 */
