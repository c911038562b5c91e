pub const ICM_20948_WHO_AM_I: u8 = 0xEA;

#[derive(Clone, Copy)]
pub enum RegAddrGeneral {
    BankSel = 0x7F,
}

#[derive(Clone, Copy)]
pub enum RegAddrBank0 {
    WhoAmI = 0x00,
    PwrMgmt1 = 0x06,
    IntStatus1 = 0x1A,
    GyroZoutH = 0x37,
}

#[derive(Clone, Copy)]
pub enum RegAddrBank2 {
    GyroSmplrtDiv = 0x00,
    GyroConfig1 = 0x01,
}

#[derive(Clone, Copy)]
pub enum PwrMgmt1Bits {
    ClkSelAuto = 0x01,
    LPEnable = 0x01 << 5,
    Sleep = 0x01 << 6,
    DeviceReset = 0x01 << 7,
}

#[derive(Clone, Copy)]
pub enum GyroConfig1Bits {
    GyroFChoice = 0x01 << 0,
    GyroFSSel = 0x03 << 1,
    GyroDLPFCFG = 0x07 << 3,
}

#[derive(Clone, Copy)]
pub enum GyroFullScaleSel {
    Dps250 = 0x00,
    Dps500 = 0x01,
    Dps1000 = 0x02,
    Dps2000 = 0x03,
}

impl GyroFullScaleSel {
    // LSB per deg/s
    pub fn sensitivity(self) -> f32 {
        match self {
            GyroFullScaleSel::Dps250 => 131.0,
            GyroFullScaleSel::Dps500 => 65.5,
            GyroFullScaleSel::Dps1000 => 32.8,
            GyroFullScaleSel::Dps2000 => 16.4,
        }
    }
}

// D = 3dB bandwidth, N = noise bandwidth, in Hz
#[derive(Clone, Copy)]
pub enum GyroDLPFSel {
    D196bw6N229bw8 = 0x00,
    D151bw8N187bw6 = 0x01,
    D119bw5N154bw3 = 0x02,
    D51bw2N73bw3 = 0x03,
    D23bw9N35bw9 = 0x04,
    D11bw6N17bw8 = 0x05,
    D5bw7N8bw9 = 0x06,
    D361bw4N376bw5 = 0x07,
    Disable = 0xFF,
}
