//! Mainnet account snapshots used by the decoder tests.

pub const METADATA_PUBKEY: &str = "FtCkYkLhZPGuNo74ppS4DJMMmF51g3bTmjNTmFBv5qCn";
pub const METADATA: &[u8] = &[
    4, 147, 180, 78, 231, 209, 46, 101, 140, 170, 106, 194, 3, 175, 127, 110,
    205, 196, 102, 63, 226, 244, 231, 21, 105, 117, 189, 77, 41, 72, 169, 55,
    223, 110, 90, 154, 182, 170, 119, 210, 213, 209, 147, 109, 13, 149, 151, 231,
    171, 77, 59, 112, 20, 128, 188, 174, 236, 84, 45, 109, 60, 95, 184, 182,
    239, 32, 0, 0, 0, 75, 79, 68, 65, 77, 65, 48, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 10, 0, 0, 0, 75, 79, 68, 65, 77, 65, 0,
    0, 0, 0, 200, 0, 0, 0, 104, 116, 116, 112, 115, 58, 47, 47, 97,
    114, 119, 101, 97, 118, 101, 46, 110, 101, 116, 47, 69, 102, 50, 109, 51,
    101, 109, 79, 48, 71, 45, 121, 90, 89, 103, 101, 108, 78, 87, 74, 101,
    95, 73, 54, 120, 81, 109, 51, 115, 49, 55, 45, 55, 48, 70, 117, 49,
    120, 117, 53, 85, 100, 99, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 100,
    0, 1, 4, 0, 0, 0, 81, 82, 116, 68, 209, 61, 121, 128, 70, 211,
    38, 152, 61, 100, 139, 77, 60, 192, 43, 161, 150, 110, 128, 58, 16, 175,
    219, 204, 103, 3, 93, 241, 1, 0, 147, 180, 78, 231, 209, 46, 101, 140,
    170, 106, 194, 3, 175, 127, 110, 205, 196, 102, 63, 226, 244, 231, 21, 105,
    117, 189, 77, 41, 72, 169, 55, 223, 0, 90, 251, 97, 182, 55, 122, 127,
    179, 50, 199, 57, 253, 172, 197, 252, 63, 95, 148, 109, 178, 13, 153, 60,
    45, 31, 185, 200, 224, 177, 206, 191, 57, 103, 0, 2, 245, 255, 231, 124,
    148, 129, 91, 82, 97, 206, 220, 203, 141, 49, 134, 114, 166, 145, 132, 10,
    90, 130, 141, 124, 36, 137, 147, 111, 126, 76, 27, 28, 0, 8, 1, 1,
    1, 255, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0,
];

pub const MASTER_EDITION_V2_PUBKEY: &str = "39NwbGjM45RePGfZUtd9g7SoXWoYqE78XMhrsMLMynWW";
pub const MASTER_EDITION_V2: &[u8] = &[
    6, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const EDITION_PUBKEY: &str = "3TErNLvnj3H37YbE8WgL36jaEqk68Bgd8EsDc6SzGddQ";
pub const EDITION: &[u8] = &[
    1, 128, 76, 145, 104, 160, 249, 49, 32, 67, 199, 30, 251, 150, 212, 71,
    166, 7, 173, 123, 77, 205, 81, 118, 70, 173, 31, 15, 27, 106, 174, 220,
    251, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0,
];

pub const VAULT: &[u8] = &[
    3, 6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121,
    172, 28, 180, 133, 237, 95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0,
    169, 71, 38, 131, 101, 207, 127, 177, 127, 163, 90, 68, 85, 157, 200, 198,
    20, 103, 37, 43, 146, 233, 17, 84, 167, 39, 236, 123, 161, 167, 33, 225,
    106, 43, 225, 226, 94, 43, 41, 135, 17, 55, 101, 64, 229, 84, 100, 187,
    16, 163, 77, 175, 4, 220, 86, 93, 173, 171, 21, 189, 218, 39, 73, 94,
    181, 134, 12, 78, 67, 40, 62, 206, 101, 158, 36, 175, 176, 33, 74, 212,
    134, 147, 84, 98, 218, 194, 148, 87, 102, 158, 223, 151, 64, 36, 102, 29,
    27, 144, 170, 240, 95, 87, 246, 76, 62, 187, 234, 115, 107, 102, 39, 3,
    191, 11, 141, 98, 56, 146, 28, 199, 88, 33, 214, 7, 201, 127, 24, 150,
    132, 1, 39, 155, 225, 118, 200, 122, 197, 34, 241, 82, 167, 18, 255, 174,
    17, 241, 1, 201, 251, 212, 32, 168, 46, 153, 113, 134, 152, 249, 208, 164,
    76, 133, 1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const SAFETY_DEPOSIT_BOX: &[u8] = &[
    1, 109, 241, 68, 47, 171, 208, 91, 244, 76, 42, 107, 166, 221, 246, 88,
    68, 240, 44, 172, 175, 79, 200, 139, 102, 178, 85, 158, 14, 199, 95, 172,
    130, 13, 73, 30, 224, 170, 51, 160, 137, 146, 198, 119, 235, 124, 191, 159,
    119, 44, 240, 255, 237, 249, 82, 18, 81, 179, 0, 153, 197, 244, 9, 195,
    185, 153, 171, 162, 52, 180, 13, 54, 93, 71, 36, 115, 222, 200, 117, 22,
    245, 208, 55, 144, 235, 166, 38, 14, 117, 81, 164, 8, 127, 242, 178, 132,
    193, 0,
];

pub const AUCTION_PUBKEY: &str = "9bwkW9XHYaXazKmzVkcRuAXGRt27REWEcdRYYDeJQVYy";
pub const AUCTION: &[u8] = &[
    123, 241, 64, 204, 46, 77, 161, 62, 0, 16, 51, 52, 38, 40, 212, 235,
    255, 171, 248, 170, 122, 234, 55, 122, 223, 217, 190, 50, 69, 209, 205, 136,
    6, 155, 136, 87, 254, 171, 129, 132, 251, 104, 127, 99, 70, 24, 192, 53,
    218, 196, 57, 220, 26, 235, 59, 85, 152, 160, 240, 0, 0, 0, 0, 1,
    0, 1, 13, 235, 116, 97, 0, 0, 0, 0, 1, 128, 244, 3, 0, 0,
    0, 0, 0, 1, 16, 14, 0, 0, 0, 0, 0, 0, 1, 0, 163, 225,
    17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0,
    0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const AUCTION_DATA_EXTENDED_PUBKEY: &str = "5QqdqErD2wB9AttDbn4pKJvoASF8emsqz2KKL7CiuBsK";
pub const AUCTION_DATA_EXTENDED: &[u8] = &[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BIDDER_POT_PUBKEY: &str = "GN2CivYLcfZUkFQAed91YAzwsYafRfirckEkNbiWEPdP";
pub const BIDDER_POT: &[u8] = &[
    223, 42, 101, 235, 78, 51, 251, 235, 176, 200, 39, 96, 3, 78, 130, 231,
    193, 0, 164, 196, 66, 37, 107, 93, 227, 150, 114, 103, 58, 178, 132, 93,
    127, 97, 127, 175, 83, 30, 28, 18, 27, 73, 238, 125, 180, 251, 101, 121,
    200, 91, 72, 89, 76, 234, 73, 7, 194, 181, 65, 5, 21, 221, 101, 133,
    232, 201, 220, 84, 74, 57, 145, 125, 147, 149, 89, 77, 211, 249, 224, 131,
    222, 56, 35, 138, 89, 238, 92, 87, 220, 178, 246, 238, 202, 236, 62, 39,
    0,
];

pub const BIDDER_METADATA_PUBKEY: &str = "6EjxBbJDhtbV9D2Wps5dZ247nteYEaNE5TcUzUkvkhE2";
pub const BIDDER_METADATA: &[u8] = &[
    58, 9, 79, 111, 164, 63, 57, 222, 155, 135, 25, 90, 97, 234, 214, 85,
    51, 131, 135, 116, 55, 29, 114, 45, 192, 149, 206, 136, 134, 125, 38, 42,
    88, 69, 50, 125, 143, 160, 2, 161, 243, 125, 230, 132, 204, 234, 114, 177,
    85, 18, 48, 10, 197, 254, 205, 249, 162, 153, 171, 228, 209, 58, 65, 65,
    0, 202, 154, 59, 0, 0, 0, 0, 91, 255, 77, 97, 0, 0, 0, 0,
    0,
];

pub const STORE_PUBKEY: &str = "AzzC7t3QKC4dt3vfYk5c41D7Mu3sXQtoyzzAvSpPSeC2";
pub const STORE: &[u8] = &[
    3, 0, 8, 175, 169, 191, 10, 132, 153, 239, 245, 177, 12, 199, 221, 36,
    59, 224, 20, 103, 70, 219, 249, 150, 85, 157, 145, 130, 193, 93, 188, 24,
    246, 87, 13, 186, 28, 52, 26, 119, 115, 94, 210, 96, 195, 36, 182, 190,
    250, 187, 9, 244, 245, 52, 7, 50, 47, 49, 172, 28, 41, 212, 233, 209,
    175, 49, 11, 112, 101, 177, 227, 209, 124, 69, 56, 157, 82, 127, 107, 4,
    195, 205, 88, 184, 108, 115, 26, 160, 253, 181, 73, 182, 209, 188, 3, 248,
    41, 70, 6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235,
    121, 172, 28, 180, 133, 237, 95, 91, 55, 145, 58, 140, 245, 133, 126, 255,
    0, 169, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0,
];

pub const WHITELISTED_CREATOR_PUBKEY: &str = "2LVwXdhXvSjCh6GnZRXbr4PQCgYY6hvqu81yQ4t6KJXj";
pub const WHITELISTED_CREATOR: &[u8] = &[
    4, 222, 99, 207, 91, 100, 212, 192, 126, 5, 17, 23, 101, 246, 130, 148,
    114, 198, 167, 32, 129, 152, 89, 10, 58, 215, 5, 76, 165, 120, 128, 150,
    153, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const AUCTION_MANAGER_V2_PUBKEY: &str = "CTSq1P4kNw7ZpAGhgUUTkmu49zgQWzqKUNpkfJXd335";
pub const AUCTION_MANAGER_V2: &[u8] = &[
    10, 50, 16, 84, 92, 115, 147, 207, 82, 165, 31, 148, 116, 27, 11, 123,
    56, 115, 62, 165, 237, 235, 50, 182, 144, 244, 14, 87, 205, 105, 183, 190,
    7, 187, 123, 2, 51, 249, 9, 176, 69, 61, 137, 253, 76, 217, 151, 176,
    199, 235, 72, 189, 23, 11, 179, 101, 131, 51, 113, 26, 184, 182, 205, 62,
    189, 47, 84, 93, 242, 189, 180, 88, 0, 146, 226, 148, 162, 224, 152, 90,
    36, 181, 29, 209, 209, 149, 133, 245, 195, 207, 213, 126, 150, 85, 15, 26,
    82, 68, 117, 178, 34, 44, 159, 211, 90, 21, 0, 168, 86, 145, 130, 0,
    221, 209, 225, 86, 27, 120, 150, 207, 27, 31, 137, 122, 190, 137, 194, 99,
    215, 38, 212, 34, 237, 108, 233, 160, 76, 41, 235, 146, 25, 50, 105, 51,
    82, 253, 221, 49, 92, 219, 12, 175, 30, 166, 0, 248, 135, 62, 153, 117,
    22, 3, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0,
];

pub const PAYOUT_TICKET_PUBKEY: &str = "DFR4sQFcQwZdy2wC8Yj4D7yQ9dVhyoNsPhNdWLbgt1cK";
pub const PAYOUT_TICKET: &[u8] = &[
    5, 140, 95, 0, 13, 100, 112, 203, 158, 125, 244, 110, 189, 48, 173, 149,
    83, 229, 48, 191, 188, 57, 3, 29, 149, 93, 43, 86, 47, 190, 46, 231,
    93, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const SAFETY_DEPOSIT_CONFIG_PUBKEY: &str = "6RJF37TpcAiFaBmUZn1CQizg5eU5kFVicoRgYQgnmk7G";
pub const SAFETY_DEPOSIT_CONFIG: &[u8] = &[
    9, 145, 140, 29, 179, 16, 247, 80, 89, 178, 65, 86, 88, 251, 148, 32,
    16, 135, 125, 73, 82, 180, 89, 63, 1, 248, 98, 225, 106, 86, 28, 91,
    41, 0, 0, 0, 0, 0, 0, 0, 0, 3, 1, 1, 1, 0, 0, 0,
    1, 12, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BID_REDEMPTION_V2_PUBKEY: &str = "6oE17ad2Wv2qjqZE6EJmJuFzLvJ3muR5YAXzW9QEHWau";
pub const BID_REDEMPTION_V2: &[u8] = &[
    11, 1, 0, 0, 0, 0, 0, 0, 0, 0, 192, 163, 157, 47, 215, 88,
    226, 250, 251, 170, 17, 167, 240, 83, 220, 227, 245, 113, 177, 229, 154, 15,
    200, 121, 84, 163, 243, 226, 239, 192, 118, 249, 128,
];

pub const PRIZE_TRACKING_TICKET_PUBKEY: &str = "H3WJmyQ9J6QKDe3N9wbwqttWTEgp6fuw2BcSTdkuB8wi";
pub const PRIZE_TRACKING_TICKET: &[u8] = &[
    8, 2, 248, 232, 186, 0, 40, 216, 115, 18, 98, 220, 153, 196, 54, 123,
    98, 248, 157, 22, 75, 97, 14, 20, 104, 57, 93, 211, 151, 72, 222, 4,
    109, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0,
    0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];
