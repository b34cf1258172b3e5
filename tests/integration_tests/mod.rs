mod billkeys;
mod codes;
mod helpers;
mod subscribe_payments;
