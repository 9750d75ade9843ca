//! Ceremony content shown while a draw is in flight

use rand::seq::SliceRandom;
use rand::Rng;

/// Shown the instant the horses finish, before the first rotation
pub const INITIAL_LOADING_MESSAGE: &str = "Đang kết nối tâm linh...";

/// Status lines rotated while waiting on the interpretation
pub const LOADING_MESSAGES: [&str; 15] = [
    "Đang call video gấp với Ngọc Hoàng...",
    "Mạng Thiên Đình hơi lag, chờ xíu nha...",
    "Đang tải nhân phẩm, vui lòng không hối...",
    "Đang check xem năm nay thoát ế chưa...",
    "Alo Thần Tài nghe rõ trả lời...",
    "Tín hiệu vũ trụ đang tới...",
    "Đang xin vía Thần Tài cho bạn giàu to...",
    "Bình tĩnh, giàu sang đang tới...",
    "Đang bật chế độ 'hốt bạc'...",
    "Loading vận may... 99%...",
    "Đang check var xem năm nay giàu cỡ nào...",
    "Vũ trụ đang gửi thông điệp, đừng tắt máy...",
    "Đang xin keo... chờ chút...",
    "Đang order trà sữa mời Táo Quân...",
    "Đang scan vân tay để mở két vàng...",
];

pub fn pick_loading_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LOADING_MESSAGES
        .choose(rng)
        .copied()
        .unwrap_or(INITIAL_LOADING_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert!(LOADING_MESSAGES.contains(&pick_loading_message(&mut rng)));
        }
    }
}
