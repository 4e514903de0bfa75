use criterion::{black_box, criterion_group, criterion_main, Criterion};
use metaplex_meta_indexer::core::decoders::{classify, decode_account};
use metaplex_meta_indexer::{AccountProcessor, KeyedAccount, MetaState, ProgramIds};
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;

fn metadata_bytes(creator: &Pubkey) -> Vec<u8> {
    borsh::to_vec(&(
        4u8,
        Pubkey::new_unique().to_bytes(),
        Pubkey::new_unique().to_bytes(),
        "Benchmark piece".to_string(),
        "BENCH".to_string(),
        "https://arweave.net/benchmark".to_string(),
        250u16,
        Some(vec![
            (creator.to_bytes(), true, 50u8),
            (Pubkey::new_unique().to_bytes(), false, 50u8),
        ]),
        false,
        true,
    ))
    .unwrap()
}

fn keyed(owner: Pubkey, data: Vec<u8>) -> KeyedAccount {
    KeyedAccount::new(
        Pubkey::new_unique(),
        Account {
            lamports: 1,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        },
    )
}

fn decoder_benchmark(c: &mut Criterion) {
    let programs = ProgramIds::default();
    let creator = Pubkey::new_unique();
    let single = keyed(programs.token_metadata, metadata_bytes(&creator));
    let batch: Vec<KeyedAccount> = (0..1_000)
        .map(|_| keyed(programs.token_metadata, metadata_bytes(&creator)))
        .collect();
    let processor = AccountProcessor::new(programs, None);

    let mut group = c.benchmark_group("decoder");

    group.bench_function("classify_metadata", |b| {
        b.iter(|| classify(&programs, black_box(&programs.token_metadata), black_box(single.data())));
    });

    group.bench_function("decode_metadata", |b| {
        b.iter(|| decode_account(&programs, black_box(&single)).unwrap());
    });

    // Stress test: decode and admit a thousand accounts.
    group.bench_function("process_1000_metadata", |b| {
        b.iter(|| {
            let mut state = MetaState::new();
            for account in &batch {
                for mutation in processor.process(black_box(account)) {
                    state.apply(mutation);
                }
            }
            state.post_process_metadata(true);
            state
        });
    });

    group.finish();
}

criterion_group!(benches, decoder_benchmark);
criterion_main!(benches);
