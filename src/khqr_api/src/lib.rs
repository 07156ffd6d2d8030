pub mod constants;
pub mod crc;
pub mod error;
pub mod merchant;
pub mod payload;
pub mod qr;
pub mod tlv;
pub mod verify;

#[cfg(not(tarpaulin_include))]
pub fn get_authority() -> verify::SettlementStub {
    verify::SettlementStub
}
